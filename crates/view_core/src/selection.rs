//! Fade-out/fade-in swap between configurator options.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::Selectable,
    outcome::{IgnoreReason, Outcome},
};
use tokio::{
    sync::watch,
    time::{sleep_until, Instant},
};
use tracing::debug;

use crate::{config::SwapTiming, error::ViewError, task::ScopedTask};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot<T> {
    pub selected: T,
    pub changing: bool,
}

impl<T> SelectionSnapshot<T> {
    /// Content opacity for the presentation layer.
    pub fn opacity(&self) -> f32 {
        if self.changing {
            0.0
        } else {
            1.0
        }
    }
}

pub struct SelectionSwap<T: Selectable> {
    options: Vec<T>,
    timing: SwapTiming,
    state: Arc<watch::Sender<SelectionSnapshot<T>>>,
    pending: Option<ScopedTask>,
}

impl<T: Selectable> SelectionSwap<T> {
    /// Starts on the first option.
    pub fn new(options: Vec<T>, timing: SwapTiming) -> Result<Self, ViewError> {
        let initial = options
            .first()
            .map(Selectable::id)
            .ok_or(ViewError::EmptySelection)?;
        Self::with_initial(options, initial, timing)
    }

    pub fn with_initial(
        options: Vec<T>,
        initial: T::Id,
        timing: SwapTiming,
    ) -> Result<Self, ViewError> {
        if options.is_empty() {
            return Err(ViewError::EmptySelection);
        }
        let selected = options
            .iter()
            .find(|option| option.id() == initial)
            .cloned()
            .ok_or_else(|| ViewError::UnknownInitialSelection(format!("{initial:?}")))?;

        let (state, _) = watch::channel(SelectionSnapshot {
            selected,
            changing: false,
        });
        Ok(Self {
            options,
            timing,
            state: Arc::new(state),
            pending: None,
        })
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn snapshot(&self) -> SelectionSnapshot<T> {
        self.state.borrow().clone()
    }

    pub fn selected_id(&self) -> T::Id {
        self.state.borrow().selected.id()
    }

    pub fn is_changing(&self) -> bool {
        self.state.borrow().changing
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionSnapshot<T>> {
        self.state.subscribe()
    }

    /// Requests `option`. Re-selecting the shown option is inert; any request
    /// while a swap is fading is dropped, as is an option that is not listed.
    /// The committed value is the listed option with the requested id.
    pub fn select(&mut self, option: T) -> Outcome {
        let target = option.id();
        let Some(option) = self.options.iter().find(|listed| listed.id() == target).cloned()
        else {
            debug!(option = ?target, "selection request for unlisted option ignored");
            return Outcome::Ignored(IgnoreReason::UnknownOption);
        };

        let mut ignored = None;
        self.state.send_if_modified(|s| {
            if s.changing {
                ignored = Some(IgnoreReason::Busy);
                return false;
            }
            if s.selected.id() == target {
                ignored = Some(IgnoreReason::AlreadySelected);
                return false;
            }
            s.changing = true;
            true
        });
        if let Some(reason) = ignored {
            debug!(option = ?target, ?reason, "selection request ignored");
            return Outcome::Ignored(reason);
        }

        let state = Arc::clone(&self.state);
        let deadline = Instant::now() + self.timing.fade();
        self.pending = Some(ScopedTask::spawn("selection-swap", async move {
            sleep_until(deadline).await;
            state.send_modify(|s| {
                s.selected = option;
                s.changing = false;
            });
            debug!(option = ?target, "selection swapped");
        }));

        Outcome::Accepted
    }

    /// Looks the option up by id among the configured options.
    pub fn select_id(&mut self, id: T::Id) -> Option<Outcome> {
        let option = self.options.iter().find(|option| option.id() == id)?.clone();
        Some(self.select(option))
    }
}

impl<T: Selectable> std::fmt::Debug for SelectionSwap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSwap")
            .field("options", &self.options.len())
            .field("selected", &self.selected_id())
            .field("changing", &self.is_changing())
            .finish()
    }
}
