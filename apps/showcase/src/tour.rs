//! Scripted walk through the four pages against a simulated window.

use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use shared::{domain::Direction, outcome::Outcome};
use view_core::{
    cursor::PointerEvent, MotionConfig, PageSession, Shell, SimulatedViewport, Viewport,
};

use crate::{content, report::Report};

const DOCUMENT_HEIGHT: f64 = 4800.0;
const VIEWPORT_HEIGHT: f64 = 900.0;
const PROGRESS_REPORT_EVERY: u8 = 25;

pub struct Tour {
    shell: Shell,
    viewport: Arc<SimulatedViewport>,
    preload: bool,
    json: bool,
}

impl Tour {
    pub fn new(config: MotionConfig, preload: bool, json: bool) -> Result<Self> {
        let viewport = Arc::new(SimulatedViewport::new(DOCUMENT_HEIGHT, VIEWPORT_HEIGHT));
        let shell = Shell::mount(config, viewport.clone()).context("failed to mount shell")?;
        Ok(Self {
            shell,
            viewport,
            preload,
            json,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        self.visit("/").await?;
        self.shell.toggle_menu();
        self.report_nav()?;

        self.visit("/models").await?;
        for offset in [0.0, 600.0, 1950.0, 3900.0] {
            self.viewport.scroll_to(offset);
            tokio::task::yield_now().await;
            self.report_scroll()?;
        }

        self.visit("/gallery").await?;
        self.play_gallery().await?;

        self.visit("/bespoke").await?;
        self.play_bespoke().await?;

        self.shell.unmount();
        tracing::info!("tour finished");
        Ok(())
    }

    async fn visit(&mut self, path: &str) -> Result<()> {
        let plan = content::plan_for(path, self.preload)?
            .ok_or_else(|| anyhow!("no route for '{path}'"))?;
        self.shell
            .navigate(path, plan)
            .with_context(|| format!("failed to enter '{path}'"))?;
        self.report_nav()?;

        let Some(mut updates) = self.page()?.preload_updates() else {
            return Ok(());
        };

        let mut next_report = 0;
        loop {
            let snapshot = *updates.borrow_and_update();
            if snapshot.percent >= next_report {
                Report::Preload {
                    percent: snapshot.percent,
                    label: snapshot.label(),
                    emphasized: snapshot.label_emphasized(),
                }
                .emit(self.json)?;
                next_report = snapshot.percent.saturating_add(PROGRESS_REPORT_EVERY);
            }
            if snapshot.revealed {
                break;
            }
            updates
                .changed()
                .await
                .context("preload stopped before reveal")?;
        }

        self.report_nav()
    }

    async fn play_gallery(&mut self) -> Result<()> {
        let delay = self.shell.config().carousel.transition() + Duration::from_millis(50);
        let json = self.json;

        if let Some(cursor) = self.page_mut()?.cursor_mut() {
            cursor.handle(PointerEvent::Move { x: 640.0, y: 360.0 });
            cursor.handle(PointerEvent::Down);
            let cursor = *cursor;
            Report::Cursor {
                x: cursor.x,
                y: cursor.y,
                scale: cursor.scale,
            }
            .emit(json)?;
        }

        for direction in [Direction::Next, Direction::Next] {
            let outcome = self.carousel_mut()?.advance(direction);
            self.report_carousel(Some(outcome))?;
        }
        tokio::time::sleep(delay).await;
        self.report_carousel(None)?;

        let outcome = self.carousel_mut()?.advance(Direction::Prev);
        self.report_carousel(Some(outcome))?;
        tokio::time::sleep(delay).await;
        self.report_carousel(None)?;

        let outcome = self.carousel_mut()?.advance(Direction::Prev);
        self.report_carousel(Some(outcome))?;
        tokio::time::sleep(delay).await;
        self.report_carousel(None)
    }

    async fn play_bespoke(&mut self) -> Result<()> {
        let delay = self.shell.config().swap.fade() + Duration::from_millis(50);
        let swatches = content::bespoke_swatches()?;

        for swatch in [&swatches[0], &swatches[1], &swatches[2]] {
            let outcome = self.selection_mut()?.select(swatch.clone());
            self.report_selection(Some(outcome))?;
        }
        tokio::time::sleep(delay).await;
        self.report_selection(None)?;

        let outcome = self.selection_mut()?.select(swatches[2].clone());
        self.report_selection(Some(outcome))?;
        tokio::time::sleep(delay).await;
        self.report_selection(None)
    }

    fn page(&self) -> Result<&PageSession> {
        self.shell.page().context("no page mounted")
    }

    fn page_mut(&mut self) -> Result<&mut PageSession> {
        self.shell.page_mut().context("no page mounted")
    }

    fn carousel_mut(&mut self) -> Result<&mut view_core::Carousel<shared::domain::Slide>> {
        self.page_mut()?
            .carousel_mut()
            .context("page has no carousel")
    }

    fn selection_mut(
        &mut self,
    ) -> Result<&mut view_core::SelectionSwap<shared::domain::Swatch>> {
        self.page_mut()?
            .selection_mut()
            .context("page has no selection")
    }

    fn report_nav(&self) -> Result<()> {
        let nav = self.shell.nav();
        Report::Nav {
            path: nav.current_path,
            mobile_menu_open: nav.mobile_menu_open,
            opacity: self.page().map(PageSession::opacity).unwrap_or(1.0),
        }
        .emit(self.json)
    }

    fn report_scroll(&self) -> Result<()> {
        let sample = self.shell.scroll();
        let parallax = self.shell.parallax();
        Report::Scroll {
            offset_y: sample.offset_y,
            progress_pct: sample.progress_pct,
            translate_y: parallax.translate_y(sample.offset_y),
            video_scale: parallax.video_scale(sample.offset_y),
        }
        .emit(self.json)
    }

    fn report_carousel(&self, outcome: Option<Outcome>) -> Result<()> {
        let carousel = self.page()?.carousel().context("page has no carousel")?;
        let snapshot = carousel.snapshot();
        let slide = carousel.current();
        Report::Carousel {
            counter: carousel.counter_label(),
            title: slide.title.clone(),
            video: slide.video.clone(),
            transitioning: snapshot.blurred(),
            outcome,
        }
        .emit(self.json)
    }

    fn report_selection(&self, outcome: Option<Outcome>) -> Result<()> {
        let selection = self.page()?.selection().context("page has no selection")?;
        let snapshot = selection.snapshot();
        Report::Selection {
            name: snapshot.selected.name.clone(),
            hex: snapshot.selected.hex.to_string(),
            changing: snapshot.changing,
            outcome,
        }
        .emit(self.json)
    }
}
