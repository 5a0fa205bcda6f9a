//! Platform seam for the window's scroll position and document geometry.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::broadcast;

const SCROLL_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScrollMetrics {
    pub offset_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn scrollable_height(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// Read access to scroll geometry plus the one mutation this layer performs:
/// resetting the scroll offset on navigation.
pub trait Viewport: Send + Sync {
    fn metrics(&self) -> ScrollMetrics;
    fn scroll_to(&self, offset_y: f64);
    /// Scroll events in delivery order.
    fn subscribe(&self) -> broadcast::Receiver<ScrollMetrics>;

    fn scroll_to_top(&self) {
        self.scroll_to(0.0);
    }
}

/// In-memory window used by the showcase tour and by tests.
#[derive(Debug)]
pub struct SimulatedViewport {
    metrics: Mutex<ScrollMetrics>,
    events: broadcast::Sender<ScrollMetrics>,
}

impl SimulatedViewport {
    pub fn new(document_height: f64, viewport_height: f64) -> Self {
        let (events, _) = broadcast::channel(SCROLL_EVENT_CAPACITY);
        Self {
            metrics: Mutex::new(ScrollMetrics {
                offset_y: 0.0,
                document_height,
                viewport_height,
            }),
            events,
        }
    }

    /// Replaces the document height, e.g. when a new page is laid out. The
    /// offset is clamped into the new scrollable range.
    pub fn set_document_height(&self, document_height: f64) {
        let mut metrics = self.lock();
        metrics.document_height = document_height;
        metrics.offset_y = metrics.offset_y.min(metrics.scrollable_height());
    }

    fn lock(&self) -> MutexGuard<'_, ScrollMetrics> {
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Viewport for SimulatedViewport {
    fn metrics(&self) -> ScrollMetrics {
        *self.lock()
    }

    fn scroll_to(&self, offset_y: f64) {
        let snapshot = {
            let mut metrics = self.lock();
            let target = if offset_y.is_finite() {
                offset_y.clamp(0.0, metrics.scrollable_height())
            } else {
                0.0
            };
            if target == metrics.offset_y {
                return;
            }
            metrics.offset_y = target;
            *metrics
        };

        // No subscribers is fine; nobody is listening yet.
        let _ = self.events.send(snapshot);
    }

    fn subscribe(&self) -> broadcast::Receiver<ScrollMetrics> {
        self.events.subscribe()
    }
}
