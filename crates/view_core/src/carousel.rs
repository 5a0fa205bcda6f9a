//! Wrapping slide carousel with a debounced blur/crossfade window.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::Direction,
    outcome::{IgnoreReason, Outcome},
};
use tokio::{
    sync::watch,
    time::{sleep_until, Instant},
};
use tracing::debug;

use crate::{config::CarouselTiming, error::ViewError, task::ScopedTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub transitioning: bool,
}

impl CarouselSnapshot {
    /// The canvas is blurred for the whole transition window.
    pub fn blurred(&self) -> bool {
        self.transitioning
    }

    /// HUD counter such as `01 / 03`.
    pub fn counter_label(&self, len: usize) -> String {
        format!("{:02} / {:02}", self.index + 1, len)
    }
}

/// Wraparound step; `len` must be non-zero.
pub fn step_index(index: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Next => (index + 1) % len,
        Direction::Prev => (index + len - 1) % len,
    }
}

pub struct Carousel<T> {
    items: Vec<T>,
    timing: CarouselTiming,
    state: Arc<watch::Sender<CarouselSnapshot>>,
    pending: Option<ScopedTask>,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, timing: CarouselTiming) -> Result<Self, ViewError> {
        if items.is_empty() {
            return Err(ViewError::EmptyCarousel);
        }

        let (state, _) = watch::channel(CarouselSnapshot::default());
        Ok(Self {
            items,
            timing,
            state: Arc::new(state),
            pending: None,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.state.subscribe()
    }

    /// The item on screen. It only changes once a transition completes.
    pub fn current(&self) -> &T {
        &self.items[self.snapshot().index]
    }

    pub fn counter_label(&self) -> String {
        self.snapshot().counter_label(self.items.len())
    }

    /// Starts a transition toward the neighbouring slide. The index moves once
    /// the transition delay has elapsed; requests made in the meantime are
    /// dropped.
    pub fn advance(&mut self, direction: Direction) -> Outcome {
        let accepted = self.state.send_if_modified(|s| {
            if s.transitioning {
                return false;
            }
            s.transitioning = true;
            true
        });
        if !accepted {
            debug!(?direction, "carousel transition in flight; dropping request");
            return Outcome::Ignored(IgnoreReason::Busy);
        }

        let len = self.items.len();
        let state = Arc::clone(&self.state);
        let deadline = Instant::now() + self.timing.transition();
        self.pending = Some(ScopedTask::spawn("carousel-transition", async move {
            sleep_until(deadline).await;
            state.send_modify(|s| {
                s.index = step_index(s.index, len, direction);
                s.transitioning = false;
            });
            debug!(?direction, index = state.borrow().index, "carousel settled");
        }));

        Outcome::Accepted
    }
}

impl<T> std::fmt::Debug for Carousel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.items.len())
            .field("timing", &self.timing)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
