//! Route-change guard for the navigation shell.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::viewport::Viewport;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub current_path: String,
    pub mobile_menu_open: bool,
}

impl NavState {
    /// Whether the nav link for `path` should render highlighted.
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}

/// Closes the mobile menu and scrolls to the top whenever the path changes.
/// The only other way to move the menu is an explicit toggle or close.
pub struct NavigationGuard {
    viewport: Arc<dyn Viewport>,
    state: watch::Sender<NavState>,
    previous: Option<String>,
}

impl NavigationGuard {
    pub fn new(viewport: Arc<dyn Viewport>) -> Self {
        let (state, _) = watch::channel(NavState::default());
        Self {
            viewport,
            state,
            previous: None,
        }
    }

    pub fn snapshot(&self) -> NavState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavState> {
        self.state.subscribe()
    }

    pub fn is_current(&self, path: &str) -> bool {
        self.previous.as_deref() == Some(path)
    }

    /// Runs synchronously before the next page is shown. Returns `false` when
    /// `path` is the path already current, in which case nothing happens.
    pub fn on_path_change(&mut self, path: &str) -> bool {
        if self.is_current(path) {
            return false;
        }

        info!(from = self.previous.as_deref().unwrap_or(""), to = path, "route changed");
        self.state.send_modify(|s| {
            s.current_path = path.to_string();
            s.mobile_menu_open = false;
        });
        self.viewport.scroll_to_top();
        self.previous = Some(path.to_string());
        true
    }

    pub fn toggle_menu(&mut self) -> bool {
        let mut open = false;
        self.state.send_modify(|s| {
            s.mobile_menu_open = !s.mobile_menu_open;
            open = s.mobile_menu_open;
        });
        debug!(open, "mobile menu toggled");
        open
    }

    pub fn close_menu(&mut self) {
        self.state.send_if_modified(|s| std::mem::replace(&mut s.mobile_menu_open, false));
    }
}

impl std::fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("state", &*self.state.borrow())
            .finish()
    }
}
