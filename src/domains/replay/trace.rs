use crate::common::DomainError;
use crate::domains::layout::{EMPTY_SYMBOL, OBSTACLE_SYMBOL};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Largest frame a trace may describe; frames are allocated densely.
pub const MAX_TRACE_CELLS: usize = 1 << 20;

/// `[row, col]` on the wire. Signed so malformed negative values still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord(pub i64, pub i64);

impl Coord {
    pub fn row(&self) -> i64 {
        self.0
    }

    pub fn col(&self) -> i64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub width: usize,
    pub height: usize,
}

impl GridDimensions {
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row() >= 0
            && coord.col() >= 0
            && (coord.row() as u64) < self.height as u64
            && (coord.col() as u64) < self.width as u64
    }

    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStep {
    pub positions: BTreeMap<String, Coord>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementStats {
    pub average_movements: f64,
    pub max_movements: u64,
    pub total_movements: BTreeMap<String, u64>,
}

/// Time-indexed agent positions returned by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TraceWire")]
pub struct Trace {
    pub grid_dimensions: GridDimensions,
    pub obstacles: Vec<Coord>,
    pub time_log: Vec<TimeStep>,
    pub movement_stats: Option<MovementStats>,
}

impl Trace {
    /// Index of the final step, 0 for an empty log.
    pub fn last_step(&self) -> usize {
        self.time_log.len().saturating_sub(1)
    }

    /// Every agent id appearing in any step, not only the first.
    pub fn agent_ids(&self) -> BTreeSet<String> {
        self.time_log
            .iter()
            .flat_map(|step| step.positions.keys().cloned())
            .collect()
    }
}

#[derive(Deserialize)]
struct TraceWire {
    grid_dimensions: GridDimensions,
    #[serde(default)]
    obstacles: Option<Vec<Coord>>,
    time_log: Vec<TimeStepWire>,
    #[serde(default)]
    movement_stats: Option<MovementStats>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimeStepWire {
    Sparse {
        positions: BTreeMap<String, Coord>,
        #[serde(default)]
        timestamp: String,
    },
    Dense {
        grid: Vec<Vec<String>>,
        #[serde(default)]
        timestamp: String,
    },
}

/// Positions for one dense frame.
///
/// The planner draws every frame over a copy of the submitted grid, so a robot that has left its
/// start cell shows up twice: once where it is and once, stale, where it started. The copy away
/// from the start cell wins.
fn dense_positions(
    grid: &[Vec<String>],
    origins: &mut BTreeMap<String, Coord>,
    obstacles: &mut Vec<Coord>,
    seen_obstacles: &mut BTreeSet<Coord>,
) -> BTreeMap<String, Coord> {
    let mut sightings: BTreeMap<String, Vec<Coord>> = BTreeMap::new();
    for (row, cells) in grid.iter().enumerate() {
        for (col, symbol) in cells.iter().enumerate() {
            let coord = Coord(row as i64, col as i64);
            match symbol.as_str() {
                EMPTY_SYMBOL | "" => {}
                OBSTACLE_SYMBOL => {
                    if seen_obstacles.insert(coord) {
                        obstacles.push(coord);
                    }
                }
                agent => sightings.entry(agent.to_string()).or_default().push(coord),
            }
        }
    }

    sightings
        .into_iter()
        .filter_map(|(agent, coords)| {
            let first = *coords.first()?;
            let origin = *origins.entry(agent.clone()).or_insert(first);
            let coord = coords.iter().copied().find(|coord| *coord != origin).unwrap_or(first);
            Some((agent, coord))
        })
        .collect()
}

impl TryFrom<TraceWire> for Trace {
    type Error = DomainError;

    fn try_from(wire: TraceWire) -> Result<Self, Self::Error> {
        let dimensions = wire.grid_dimensions;
        if dimensions.cell_count().map_or(true, |cells| cells > MAX_TRACE_CELLS) {
            return Err(DomainError::InvalidTrace {
                reason: format!(
                    "grid {}x{} exceeds {} cells",
                    dimensions.width, dimensions.height, MAX_TRACE_CELLS
                ),
            });
        }

        let mut origins = BTreeMap::new();
        let mut seen_obstacles = BTreeSet::new();
        let mut dense_obstacles = Vec::new();
        let mut time_log = Vec::with_capacity(wire.time_log.len());

        for step in wire.time_log {
            match step {
                TimeStepWire::Sparse { positions, timestamp } => {
                    time_log.push(TimeStep { positions, timestamp });
                }
                TimeStepWire::Dense { grid, timestamp } => {
                    let positions =
                        dense_positions(&grid, &mut origins, &mut dense_obstacles, &mut seen_obstacles);
                    time_log.push(TimeStep { positions, timestamp });
                }
            }
        }

        Ok(Trace {
            grid_dimensions: dimensions,
            obstacles: wire.obstacles.unwrap_or(dense_obstacles),
            time_log,
            movement_stats: wire.movement_stats,
        })
    }
}
