// Replay Service - opens replay sessions and drives playback to the end
use crate::common::ApplicationResult;
use crate::domains::replay::{stats, PlaybackState, ReplaySession, Trace};
use crate::domains::DynLogger;

pub struct ReplayService {
    logger: DynLogger,
    default_speed_ms: u64,
}

impl ReplayService {
    pub fn new(logger: DynLogger, default_speed_ms: u64) -> Self {
        Self {
            logger,
            default_speed_ms,
        }
    }

    /// Opens a session over `trace`. Reported stats that disagree with the time log are
    /// logged but still shown as reported.
    pub fn open_session(&self, trace: Trace) -> ApplicationResult<ReplaySession> {
        for discrepancy in stats::verify(&trace) {
            self.logger.warn(&format!(
                "Robot {}: planner reported {:?} movements, trace shows {}",
                discrepancy.agent_id, discrepancy.reported, discrepancy.observed
            ));
        }
        let session = ReplaySession::open(trace, self.default_speed_ms)?;
        self.logger.info(&format!(
            "Opened replay session {} with {} steps and {} robots",
            session.id,
            session.last_step() + 1,
            session.palette().len()
        ));
        Ok(session)
    }

    /// Plays from the current step to the last one, handing every state change to `on_frame`.
    /// Returns the final state, with playback paused.
    pub async fn play_to_end<F>(&self, session: &mut ReplaySession, mut on_frame: F) -> PlaybackState
    where
        F: FnMut(&ReplaySession, PlaybackState),
    {
        let mut updates = session.scheduler.subscribe();
        let initial = session.scheduler.state();
        on_frame(&*session, initial);
        if initial.current_step >= session.last_step() {
            return initial;
        }

        session.scheduler.play();
        updates.borrow_and_update();
        while updates.changed().await.is_ok() {
            let state = *updates.borrow_and_update();
            if state.current_step >= session.last_step() {
                session.scheduler.pause();
                let finished = session.scheduler.state();
                on_frame(&*session, finished);
                self.logger.info(&format!("Replay session {} reached the last step", session.id));
                return finished;
            }
            on_frame(&*session, state);
        }
        session.scheduler.state()
    }
}
