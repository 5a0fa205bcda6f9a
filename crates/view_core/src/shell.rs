//! Navigation shell: wraps every page with the route guard and global scroll
//! feedback, and owns the page-local machines of the page on screen.

use std::sync::Arc;

use shared::{
    domain::{Slide, Swatch},
    outcome::Outcome,
};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    carousel::Carousel,
    config::MotionConfig,
    cursor::CursorFollower,
    error::ViewError,
    navigation::{NavState, NavigationGuard},
    preload::{PreloadSequencer, PreloadSnapshot},
    scroll::{Parallax, ScrollFeedback, ScrollSample},
    selection::SelectionSwap,
    viewport::Viewport,
};

/// Which machines a page needs. Pages and their content are supplied by the
/// caller's routing table.
#[derive(Debug, Clone, Default)]
pub struct PagePlan {
    pub preload: bool,
    pub slides: Option<Vec<Slide>>,
    pub swatches: Option<Vec<Swatch>>,
    pub cursor: bool,
}

impl PagePlan {
    pub fn immediate() -> Self {
        Self::default()
    }

    pub fn preloaded() -> Self {
        Self {
            preload: true,
            ..Self::default()
        }
    }

    pub fn with_slides(mut self, slides: Vec<Slide>) -> Self {
        self.slides = Some(slides);
        self
    }

    pub fn with_swatches(mut self, swatches: Vec<Swatch>) -> Self {
        self.swatches = Some(swatches);
        self
    }

    pub fn with_cursor(mut self) -> Self {
        self.cursor = true;
        self
    }
}

/// Page-local state. Dropping the session tears down every timer it started.
#[derive(Debug)]
pub struct PageSession {
    path: String,
    preload: Option<PreloadSequencer>,
    carousel: Option<Carousel<Slide>>,
    selection: Option<SelectionSwap<Swatch>>,
    cursor: Option<CursorFollower>,
}

impl PageSession {
    /// Validates the plan and builds the machines. Nothing is scheduled until
    /// [`PageSession::start`].
    fn build(path: &str, plan: PagePlan, config: &MotionConfig) -> Result<Self, ViewError> {
        let carousel = plan
            .slides
            .map(|slides| Carousel::new(slides, config.carousel))
            .transpose()?;
        let selection = plan
            .swatches
            .map(|swatches| SelectionSwap::new(swatches, config.swap))
            .transpose()?;

        Ok(Self {
            path: path.to_string(),
            preload: plan
                .preload
                .then(|| PreloadSequencer::new(config.preload)),
            carousel,
            selection,
            cursor: plan.cursor.then(CursorFollower::default),
        })
    }

    fn start(&mut self) {
        let Some(sequencer) = self.preload.as_mut() else {
            return;
        };

        let revealed_path = self.path.clone();
        let outcome = sequencer.start(move || info!(path = %revealed_path, "page revealed"));
        if let Outcome::Ignored(reason) = outcome {
            debug!(path = %self.path, ?reason, "page preload not restarted");
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn preload(&self) -> Option<PreloadSnapshot> {
        self.preload.as_ref().map(PreloadSequencer::snapshot)
    }

    pub fn preload_updates(&self) -> Option<watch::Receiver<PreloadSnapshot>> {
        self.preload.as_ref().map(PreloadSequencer::subscribe)
    }

    /// Pages without a preload are visible from the start.
    pub fn is_revealed(&self) -> bool {
        self.preload().map_or(true, |snapshot| snapshot.revealed)
    }

    pub fn opacity(&self) -> f32 {
        if self.is_revealed() {
            1.0
        } else {
            0.0
        }
    }

    pub fn carousel(&self) -> Option<&Carousel<Slide>> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel<Slide>> {
        self.carousel.as_mut()
    }

    pub fn selection(&self) -> Option<&SelectionSwap<Swatch>> {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut SelectionSwap<Swatch>> {
        self.selection.as_mut()
    }

    pub fn cursor_mut(&mut self) -> Option<&mut CursorFollower> {
        self.cursor.as_mut()
    }
}

#[derive(Debug)]
pub struct Shell {
    config: MotionConfig,
    parallax: Parallax,
    nav: NavigationGuard,
    scroll: ScrollFeedback,
    page: Option<PageSession>,
}

impl Shell {
    /// Validates `config` and starts sampling scroll events from `viewport`.
    /// Must be called from within a tokio runtime.
    pub fn mount(config: MotionConfig, viewport: Arc<dyn Viewport>) -> Result<Self, ViewError> {
        config.validate()?;

        let mut scroll = ScrollFeedback::new();
        if let Outcome::Ignored(reason) = scroll.mount(viewport.as_ref()) {
            debug!(?reason, "scroll feedback already listening");
        }

        Ok(Self {
            parallax: Parallax::new(config.parallax),
            config,
            nav: NavigationGuard::new(viewport),
            scroll,
            page: None,
        })
    }

    /// Moves to `path`. The plan is validated first; a rejected plan leaves
    /// the current path and page in place. Then the guard closes the menu and
    /// resets the scroll offset, the previous page is torn down and the new
    /// page's timers start. Navigating to the current path does nothing.
    pub fn navigate(&mut self, path: &str, plan: PagePlan) -> Result<bool, ViewError> {
        if self.nav.is_current(path) {
            return Ok(false);
        }

        let mut session = PageSession::build(path, plan, &self.config)?;
        self.nav.on_path_change(path);
        self.page = None;
        session.start();
        self.page = Some(session);
        Ok(true)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn nav(&self) -> NavState {
        self.nav.snapshot()
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.nav.toggle_menu()
    }

    pub fn close_menu(&mut self) {
        self.nav.close_menu();
    }

    pub fn scroll(&self) -> ScrollSample {
        self.scroll.snapshot()
    }

    pub fn scroll_feedback(&self) -> &ScrollFeedback {
        &self.scroll
    }

    pub fn parallax(&self) -> Parallax {
        self.parallax
    }

    pub fn page(&self) -> Option<&PageSession> {
        self.page.as_ref()
    }

    pub fn page_mut(&mut self) -> Option<&mut PageSession> {
        self.page.as_mut()
    }

    /// Tears down the current page and stops scroll sampling.
    pub fn unmount(&mut self) {
        self.page = None;
        self.scroll.unmount();
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
