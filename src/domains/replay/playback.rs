use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const MIN_SPEED_MS: u64 = 100;
pub const MAX_SPEED_MS: u64 = 1900;
pub const DEFAULT_SPEED_MS: u64 = 1000;
const SLIDER_SPAN_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_step: usize,
    pub is_playing: bool,
    pub speed_ms: u64,
}

pub fn clamp_speed(speed_ms: u64) -> u64 {
    speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

/// The speed slider is inverted: further right means a shorter tick.
pub fn slider_to_speed(slider_value: u64) -> u64 {
    clamp_speed(SLIDER_SPAN_MS.saturating_sub(slider_value))
}

/// Owns the spawned tick task; dropping the handle cancels it.
struct Ticker {
    handle: JoinHandle<()>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Steps through `[0, last_step]` on a periodic tick while playing.
///
/// `play` spawns a tokio task and must be called from within a runtime. Every tick checks
/// the playback epoch under the state lock, so once `pause`/`seek` return no earlier tick
/// can still move the step.
pub struct PlaybackScheduler {
    last_step: usize,
    state: Arc<watch::Sender<PlaybackState>>,
    epoch: Arc<AtomicU64>,
    ticker: Option<Ticker>,
}

impl PlaybackScheduler {
    pub fn new(last_step: usize, speed_ms: u64) -> Self {
        let (state, _) = watch::channel(PlaybackState {
            current_step: 0,
            is_playing: false,
            speed_ms: clamp_speed(speed_ms),
        });
        Self {
            last_step,
            state: Arc::new(state),
            epoch: Arc::new(AtomicU64::new(0)),
            ticker: None,
        }
    }

    pub fn last_step(&self) -> usize {
        self.last_step
    }

    pub fn state(&self) -> PlaybackState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.subscribe()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn play(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.is_playing = true);

        let state = Arc::clone(&self.state);
        let live_epoch = Arc::clone(&self.epoch);
        let last_step = self.last_step;
        let handle = tokio::spawn(async move {
            loop {
                let period = Duration::from_millis(state.borrow().speed_ms);
                tokio::time::sleep(period).await;

                let mut armed = true;
                state.send_if_modified(|s| {
                    if !s.is_playing || live_epoch.load(Ordering::SeqCst) != epoch {
                        armed = false;
                        return false;
                    }
                    if s.current_step >= last_step {
                        return false;
                    }
                    s.current_step += 1;
                    true
                });
                if !armed {
                    break;
                }
            }
        });
        self.ticker = Some(Ticker { handle });
    }

    pub fn pause(&mut self) {
        self.halt();
        self.state.send_if_modified(|s| std::mem::replace(&mut s.is_playing, false));
    }

    pub fn toggle(&mut self) {
        if self.state().is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jumps to `step` (clamped to the trace) and stops playback.
    pub fn seek(&mut self, step: i64) -> usize {
        self.halt();
        let target = step.clamp(0, self.last_step as i64) as usize;
        self.state.send_modify(|s| {
            s.is_playing = false;
            s.current_step = target;
        });
        target
    }

    pub fn step_forward(&mut self) -> usize {
        let current = self.state().current_step as i64;
        self.seek(current + 1)
    }

    pub fn step_backward(&mut self) -> usize {
        let current = self.state().current_step as i64;
        self.seek(current - 1)
    }

    pub fn skip_to_start(&mut self) -> usize {
        self.seek(0)
    }

    pub fn skip_to_end(&mut self) -> usize {
        self.seek(self.last_step as i64)
    }

    /// Applies from the next tick on; playback is not restarted.
    pub fn set_speed(&mut self, speed_ms: u64) -> u64 {
        let speed_ms = clamp_speed(speed_ms);
        self.state.send_if_modified(|s| {
            let changed = s.speed_ms != speed_ms;
            s.speed_ms = speed_ms;
            changed
        });
        speed_ms
    }

    fn halt(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.ticker = None;
    }
}
