use super::colors::RobotPalette;
use super::frame::{reconstruct, Frame};
use super::playback::PlaybackScheduler;
use super::stats;
use super::trace::{MovementStats, Trace, MAX_TRACE_CELLS};
use crate::common::{DomainError, DomainResult};
use rand::Rng;
use uuid::Uuid;

/// One replay of one trace. Nothing here is shared with other sessions.
pub struct ReplaySession {
    pub id: Uuid,
    trace: Trace,
    palette: RobotPalette,
    stats: MovementStats,
    pub scheduler: PlaybackScheduler,
}

impl ReplaySession {
    pub fn open(trace: Trace, speed_ms: u64) -> DomainResult<Self> {
        Self::open_with_rng(trace, speed_ms, &mut rand::thread_rng())
    }

    pub fn open_with_rng<R: Rng>(trace: Trace, speed_ms: u64, rng: &mut R) -> DomainResult<Self> {
        if trace.time_log.is_empty() {
            return Err(DomainError::InvalidTrace {
                reason: "time log is empty".to_string(),
            });
        }
        let dimensions = trace.grid_dimensions;
        if dimensions.cell_count().map_or(true, |cells| cells > MAX_TRACE_CELLS) {
            return Err(DomainError::InvalidTrace {
                reason: format!("grid {}x{} is too large to replay", dimensions.width, dimensions.height),
            });
        }
        let palette = RobotPalette::assign(trace.agent_ids(), rng);
        let stats = stats::resolve(&trace);
        let scheduler = PlaybackScheduler::new(trace.last_step(), speed_ms);
        Ok(Self {
            id: Uuid::new_v4(),
            trace,
            palette,
            stats,
            scheduler,
        })
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn palette(&self) -> &RobotPalette {
        &self.palette
    }

    pub fn stats(&self) -> &MovementStats {
        &self.stats
    }

    pub fn last_step(&self) -> usize {
        self.trace.last_step()
    }

    /// Rebuilt from the trace on every call; `step` is clamped to the last step.
    pub fn frame_at(&self, step: usize) -> Frame {
        let step = step.min(self.last_step());
        reconstruct(
            self.trace.grid_dimensions,
            &self.trace.obstacles,
            &self.trace.time_log[step].positions,
        )
    }

    pub fn current_frame(&self) -> Frame {
        self.frame_at(self.scheduler.state().current_step)
    }

    pub fn timestamp_at(&self, step: usize) -> &str {
        self.trace
            .time_log
            .get(step)
            .map(|s| s.timestamp.as_str())
            .unwrap_or("No data")
    }

    /// "Step: n / total" with a one-based step, as shown under the grid.
    pub fn progress_label(&self, step: usize) -> String {
        format!("Step: {} / {}", step.min(self.last_step()) + 1, self.trace.time_log.len())
    }

    /// Frame, timestamp and progress for one step as a terminal block.
    pub fn render_step(&self, step: usize) -> String {
        format!(
            "{}\n{}\n{}",
            self.frame_at(step).render(Some(&self.palette)),
            self.timestamp_at(step.min(self.last_step())),
            self.progress_label(step)
        )
    }
}
