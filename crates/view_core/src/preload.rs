//! Simulated asset-preload progress that gates a page's reveal.

use std::sync::Arc;

use serde::Serialize;
use shared::outcome::{IgnoreReason, Outcome};
use tokio::{
    sync::watch,
    time::{interval_at, sleep_until, Instant},
};
use tracing::{debug, info};

use crate::{config::PreloadTiming, task::ScopedTask};

pub const COMPLETE_PERCENT: u8 = 100;
const EMPHASIS_THRESHOLD: u8 = 90;

/// Source of the completion percentage. The sequencer clamps whatever this
/// returns so the published percent never decreases and never exceeds 100.
pub trait ProgressOracle: Send + 'static {
    fn advance(&mut self, current: u8) -> u8;
}

/// Fixed-step counter; not tied to real resource readiness.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedProgress {
    step: u8,
}

impl SimulatedProgress {
    pub fn new(step: u8) -> Self {
        Self { step }
    }
}

impl ProgressOracle for SimulatedProgress {
    fn advance(&mut self, current: u8) -> u8 {
        current.saturating_add(self.step)
    }
}

/// `running` is true while the counter ticks. It drops when the percent hits
/// 100, before the grace delay; `revealed` flips when that delay ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PreloadSnapshot {
    pub percent: u8,
    pub running: bool,
    pub revealed: bool,
}

impl PreloadSnapshot {
    pub fn label(&self) -> String {
        if self.percent < COMPLETE_PERCENT {
            format!("SYNCHRONIZING {}%", self.percent)
        } else {
            "ENTERING EXHIBITION".to_string()
        }
    }

    pub fn label_emphasized(&self) -> bool {
        self.percent > EMPHASIS_THRESHOLD
    }
}

pub struct PreloadSequencer {
    timing: PreloadTiming,
    state: Arc<watch::Sender<PreloadSnapshot>>,
    oracle: Option<Box<dyn ProgressOracle>>,
    task: Option<ScopedTask>,
}

impl PreloadSequencer {
    pub fn new(timing: PreloadTiming) -> Self {
        Self::with_oracle(timing, SimulatedProgress::new(timing.step))
    }

    pub fn with_oracle(timing: PreloadTiming, oracle: impl ProgressOracle) -> Self {
        let (state, _) = watch::channel(PreloadSnapshot::default());
        Self {
            timing,
            state: Arc::new(state),
            oracle: Some(Box::new(oracle)),
            task: None,
        }
    }

    pub fn snapshot(&self) -> PreloadSnapshot {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreloadSnapshot> {
        self.state.subscribe()
    }

    /// Begins ticking. `on_complete` runs once, a grace period after the
    /// percent reaches 100. A session starts at most once; later calls are
    /// ignored. Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, on_complete: F) -> Outcome
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(mut oracle) = self.oracle.take() else {
            debug!("preload already started; ignoring");
            return Outcome::Ignored(IgnoreReason::AlreadyStarted);
        };

        self.state.send_modify(|s| s.running = true);

        let state = Arc::clone(&self.state);
        let cadence = self.timing.cadence();
        let grace = self.timing.reveal_grace();
        let started_at = Instant::now();

        self.task = Some(ScopedTask::spawn("preload", async move {
            let mut ticks = interval_at(started_at + cadence, cadence);
            loop {
                ticks.tick().await;
                let mut complete = false;
                state.send_modify(|s| {
                    s.percent = oracle.advance(s.percent).clamp(s.percent, COMPLETE_PERCENT);
                    complete = s.percent == COMPLETE_PERCENT;
                    // The counter stops here; only the reveal is still pending.
                    s.running = !complete;
                });
                if complete {
                    break;
                }
            }

            sleep_until(Instant::now() + grace).await;
            state.send_modify(|s| s.revealed = true);
            info!(
                elapsed_ms = started_at.elapsed().as_millis() as u64,
                "preload complete; revealing page"
            );
            on_complete();
        }));

        Outcome::Accepted
    }

    /// Clears the interval and any pending reveal. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if self.task.take().is_some() {
            self.state.send_if_modified(|s| {
                let was_running = s.running;
                s.running = false;
                was_running
            });
        }
    }
}

impl std::fmt::Debug for PreloadSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadSequencer")
            .field("timing", &self.timing)
            .field("snapshot", &self.snapshot())
            .field("started", &self.oracle.is_none())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/preload_tests.rs"]
mod tests;
