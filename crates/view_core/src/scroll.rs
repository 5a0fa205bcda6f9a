//! Scroll-driven progress and parallax parameters.

use std::sync::Arc;

use serde::Serialize;
use shared::outcome::{IgnoreReason, Outcome};
use tokio::sync::{broadcast::error::RecvError, watch};
use tracing::{debug, warn};

use crate::{
    config::ParallaxCoefficients,
    task::ScopedTask,
    viewport::{ScrollMetrics, Viewport},
};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollSample {
    pub offset_y: f64,
    pub progress_pct: f64,
}

impl ScrollSample {
    /// A document that cannot scroll reports zero progress.
    pub fn from_metrics(metrics: ScrollMetrics) -> Self {
        let offset_y = if metrics.offset_y.is_finite() {
            metrics.offset_y.max(0.0)
        } else {
            0.0
        };
        let total = metrics.scrollable_height();
        let progress_pct = if total.is_finite() && total > 0.0 {
            (offset_y / total.max(1.0) * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            offset_y,
            progress_pct,
        }
    }
}

/// Layer transforms derived from the raw offset. Easing is left to the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    coefficients: ParallaxCoefficients,
}

impl Parallax {
    pub fn new(coefficients: ParallaxCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn translate_y(&self, offset_y: f64) -> f64 {
        offset_y * self.coefficients.translate
    }

    pub fn video_scale(&self, offset_y: f64) -> f64 {
        1.0 + offset_y * self.coefficients.video_scale
    }
}

#[derive(Debug)]
pub struct ScrollFeedback {
    state: Arc<watch::Sender<ScrollSample>>,
    listener: Option<ScopedTask>,
}

impl Default for ScrollFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollFeedback {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ScrollSample::default());
        Self {
            state: Arc::new(state),
            listener: None,
        }
    }

    pub fn snapshot(&self) -> ScrollSample {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScrollSample> {
        self.state.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Subscribes to `viewport` scroll events and seeds the sample from its
    /// current geometry. Must be called from within a tokio runtime.
    pub fn mount(&mut self, viewport: &dyn Viewport) -> Outcome {
        if self.listener.is_some() {
            return Outcome::Ignored(IgnoreReason::AlreadyStarted);
        }

        let mut events = viewport.subscribe();
        self.state
            .send_replace(ScrollSample::from_metrics(viewport.metrics()));

        let state = Arc::clone(&self.state);
        self.listener = Some(ScopedTask::spawn("scroll-feedback", async move {
            loop {
                match events.recv().await {
                    Ok(metrics) => {
                        state.send_replace(ScrollSample::from_metrics(metrics));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "scroll feedback fell behind; resuming at newest event");
                    }
                    Err(RecvError::Closed) => {
                        debug!("scroll source closed");
                        break;
                    }
                }
            }
        }));

        Outcome::Accepted
    }

    pub fn unmount(&mut self) {
        self.listener = None;
    }
}
