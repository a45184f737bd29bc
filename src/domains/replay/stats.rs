use super::trace::{MovementStats, TimeStep, Trace};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsDiscrepancy {
    pub agent_id: String,
    pub reported: Option<u64>,
    pub observed: u64,
}

/// Planner-supplied stats win; otherwise they are derived from the time log.
pub fn resolve(trace: &Trace) -> MovementStats {
    match &trace.movement_stats {
        Some(stats) => stats.clone(),
        None => recompute(&trace.time_log),
    }
}

/// Counts, per agent, the consecutive step pairs where it is present in both and has moved.
pub fn recompute(time_log: &[TimeStep]) -> MovementStats {
    let mut totals: BTreeMap<String, u64> = time_log
        .iter()
        .flat_map(|step| step.positions.keys())
        .map(|id| (id.clone(), 0))
        .collect();

    for pair in time_log.windows(2) {
        let (before, after) = (&pair[0].positions, &pair[1].positions);
        for (agent_id, coord) in after {
            if before.get(agent_id).is_some_and(|prev| prev != coord) {
                if let Some(total) = totals.get_mut(agent_id) {
                    *total += 1;
                }
            }
        }
    }

    let max_movements = totals.values().copied().max().unwrap_or(0);
    let average_movements = if totals.is_empty() {
        0.0
    } else {
        totals.values().sum::<u64>() as f64 / totals.len() as f64
    };

    MovementStats {
        average_movements,
        max_movements,
        total_movements: totals,
    }
}

/// Agents whose reported total differs from what the time log shows. Empty when the planner
/// sent no stats.
pub fn verify(trace: &Trace) -> Vec<StatsDiscrepancy> {
    let Some(reported) = &trace.movement_stats else {
        return Vec::new();
    };
    recompute(&trace.time_log)
        .total_movements
        .into_iter()
        .filter_map(|(agent_id, observed)| {
            let claimed = reported.total_movements.get(&agent_id).copied();
            (claimed != Some(observed)).then_some(StatsDiscrepancy {
                agent_id,
                reported: claimed,
                observed,
            })
        })
        .collect()
}

impl fmt::Display for MovementStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Movements: {:.2}", self.average_movements)?;
        writeln!(f, "Max Movements: {}", self.max_movements)?;
        write!(f, "Total Movements per Robot:")?;
        for (agent_id, movements) in &self.total_movements {
            write!(f, "\n  Robot {}: {} movements", agent_id, movements)?;
        }
        Ok(())
    }
}
