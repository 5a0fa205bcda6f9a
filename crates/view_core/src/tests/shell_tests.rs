use super::*;

use std::time::Duration;

use shared::{
    domain::{Direction, HexColor, SlideId, SwatchId},
    outcome::Outcome,
};
use tokio::time::sleep;

use crate::{error::ConfigError, viewport::SimulatedViewport};

fn slides() -> Vec<Slide> {
    ["PHANTOM", "SPECTRE", "CULLINAN"]
        .into_iter()
        .enumerate()
        .map(|(i, title)| Slide {
            id: SlideId(i as u32 + 1),
            title: title.to_string(),
            subtitle: String::new(),
            hex: HexColor::parse("#0F0F0F").expect("hex"),
            video: format!("/images/{}.mp4", title.to_ascii_lowercase()),
        })
        .collect()
}

fn swatches() -> Vec<Swatch> {
    [(1, "#F8F8F8"), (2, "#1B2631")]
        .into_iter()
        .map(|(id, hex)| Swatch {
            id: SwatchId(id),
            name: format!("SWATCH {id}"),
            hex: HexColor::parse(hex).expect("hex"),
            video: String::new(),
        })
        .collect()
}

fn shell() -> (Arc<SimulatedViewport>, Shell) {
    let viewport = Arc::new(SimulatedViewport::new(5000.0, 1000.0));
    let shell = Shell::mount(MotionConfig::default(), viewport.clone()).expect("shell");
    (viewport, shell)
}

#[tokio::test(start_paused = true)]
async fn route_change_resets_menu_and_scroll_before_page_machines_start() {
    let (viewport, mut shell) = shell();
    shell.navigate("/models", PagePlan::preloaded()).expect("models");
    viewport.scroll_to(1200.0);
    assert!(shell.toggle_menu());

    assert!(shell
        .navigate("/gallery", PagePlan::preloaded().with_slides(slides()))
        .expect("gallery"));

    let nav = shell.nav();
    assert_eq!(nav.current_path, "/gallery");
    assert!(!nav.mobile_menu_open);
    assert_eq!(viewport.metrics().offset_y, 0.0);

    let page = shell.page().expect("page");
    assert_eq!(page.path(), "/gallery");
    assert_eq!(page.preload().expect("preload").percent, 0);
    assert_eq!(page.carousel().expect("carousel").snapshot().index, 0);

    sleep(Duration::from_millis(1)).await;
    assert_eq!(shell.scroll().offset_y, 0.0);
}

#[tokio::test(start_paused = true)]
async fn preloaded_page_stays_hidden_until_reveal() {
    let (_viewport, mut shell) = shell();
    shell
        .navigate("/bespoke", PagePlan::preloaded().with_swatches(swatches()))
        .expect("bespoke");
    assert_eq!(shell.page().expect("page").opacity(), 0.0);

    sleep(Duration::from_millis(3500)).await;
    let page = shell.page().expect("page");
    assert_eq!(page.preload().expect("preload").percent, 100);
    assert!(!page.is_revealed());

    sleep(Duration::from_millis(400)).await;
    assert_eq!(shell.page().expect("page").opacity(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn page_without_preload_is_visible_immediately() {
    let (_viewport, mut shell) = shell();
    shell.navigate("/", PagePlan::immediate()).expect("home");
    let page = shell.page().expect("page");
    assert!(page.preload().is_none());
    assert_eq!(page.opacity(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn renavigating_to_current_path_keeps_page_state() {
    let (_viewport, mut shell) = shell();
    shell
        .navigate("/gallery", PagePlan::immediate().with_slides(slides()))
        .expect("gallery");
    let carousel = shell
        .page_mut()
        .and_then(PageSession::carousel_mut)
        .expect("carousel");
    assert_eq!(carousel.advance(Direction::Next), Outcome::Accepted);
    sleep(Duration::from_millis(1100)).await;

    assert!(!shell
        .navigate("/gallery", PagePlan::immediate().with_slides(slides()))
        .expect("same path"));
    let carousel = shell.page().and_then(PageSession::carousel).expect("carousel");
    assert_eq!(carousel.snapshot().index, 1);
    assert_eq!(carousel.current().title, "SPECTRE");
}

#[tokio::test(start_paused = true)]
async fn leaving_a_page_mid_transition_discards_it() {
    let (_viewport, mut shell) = shell();
    shell
        .navigate("/bespoke", PagePlan::immediate().with_swatches(swatches()))
        .expect("bespoke");
    let selection = shell
        .page_mut()
        .and_then(PageSession::selection_mut)
        .expect("selection");
    assert!(selection.select_id(SwatchId(2)).expect("known").is_accepted());
    let updates = selection.subscribe();

    shell.navigate("/", PagePlan::immediate()).expect("home");
    sleep(Duration::from_millis(1000)).await;

    assert!(updates.borrow().changing);
    assert_eq!(updates.borrow().selected.id, SwatchId(1));
}

#[tokio::test(start_paused = true)]
async fn cursor_is_only_built_when_requested() {
    let (_viewport, mut shell) = shell();
    shell
        .navigate("/gallery", PagePlan::immediate().with_cursor())
        .expect("gallery");
    assert!(shell.page_mut().and_then(PageSession::cursor_mut).is_some());

    shell.navigate("/", PagePlan::immediate()).expect("home");
    assert!(shell.page_mut().and_then(PageSession::cursor_mut).is_none());
}

#[tokio::test(start_paused = true)]
async fn invalid_config_and_empty_content_are_rejected() {
    let viewport = Arc::new(SimulatedViewport::new(1000.0, 1000.0));
    let mut config = MotionConfig::default();
    config.carousel.transition_ms = 0;
    let err = Shell::mount(config, viewport.clone()).expect_err("zero delay");
    assert_eq!(
        err,
        ViewError::Config(ConfigError::ZeroDuration {
            field: "carousel.transition_ms"
        })
    );

    let mut shell = Shell::mount(MotionConfig::default(), viewport).expect("shell");
    let err = shell
        .navigate("/gallery", PagePlan::immediate().with_slides(Vec::new()))
        .expect_err("empty slides");
    assert_eq!(err, ViewError::EmptyCarousel);
    assert!(shell.page().is_none());
}

#[tokio::test(start_paused = true)]
async fn rejected_plan_keeps_current_page_and_allows_retry() {
    let (viewport, mut shell) = shell();
    shell.navigate("/", PagePlan::immediate()).expect("home");
    viewport.scroll_to(700.0);
    assert!(shell.toggle_menu());

    let err = shell
        .navigate("/gallery", PagePlan::preloaded().with_slides(Vec::new()))
        .expect_err("empty slides");
    assert_eq!(err, ViewError::EmptyCarousel);

    let nav = shell.nav();
    assert_eq!(nav.current_path, "/");
    assert!(nav.mobile_menu_open);
    assert_eq!(viewport.metrics().offset_y, 700.0);
    assert_eq!(shell.page().expect("home still mounted").path(), "/");

    assert!(shell
        .navigate("/gallery", PagePlan::preloaded().with_slides(slides()))
        .expect("retry"));
    assert_eq!(shell.nav().current_path, "/gallery");
    let page = shell.page().expect("gallery mounted");
    assert_eq!(page.path(), "/gallery");
    assert_eq!(page.carousel().expect("carousel").len(), 3);

    sleep(Duration::from_millis(3900)).await;
    assert!(shell.page().expect("gallery").is_revealed());
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_scroll_sampling() {
    let (viewport, mut shell) = shell();
    shell.navigate("/models", PagePlan::immediate()).expect("models");
    viewport.scroll_to(2000.0);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(shell.scroll().progress_pct, 50.0);
    assert_eq!(shell.parallax().translate_y(shell.scroll().offset_y), 1000.0);

    shell.unmount();
    assert!(!shell.scroll_feedback().is_mounted());
    assert!(shell.page().is_none());
    viewport.scroll_to(0.0);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(shell.scroll().offset_y, 2000.0);
}
