//! Snapshot lines printed while the tour plays.

use serde::Serialize;
use shared::outcome::Outcome;

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Nav {
        path: String,
        mobile_menu_open: bool,
        opacity: f32,
    },
    Preload {
        percent: u8,
        label: String,
        emphasized: bool,
    },
    Scroll {
        offset_y: f64,
        progress_pct: f64,
        translate_y: f64,
        video_scale: f64,
    },
    Carousel {
        counter: String,
        title: String,
        video: String,
        transitioning: bool,
        outcome: Option<Outcome>,
    },
    Selection {
        name: String,
        hex: String,
        changing: bool,
        outcome: Option<Outcome>,
    },
    Cursor {
        x: f32,
        y: f32,
        scale: f32,
    },
}

impl Report {
    pub fn emit(&self, json: bool) -> anyhow::Result<()> {
        if json {
            println!("{}", serde_json::to_string(self)?);
            return Ok(());
        }

        match self {
            Report::Nav {
                path,
                mobile_menu_open,
                opacity,
            } => println!("[nav] {path} menu_open={mobile_menu_open} opacity={opacity}"),
            Report::Preload {
                percent,
                label,
                emphasized,
            } => println!("[preload] {percent:>3}% {label}{}", if *emphasized { " *" } else { "" }),
            Report::Scroll {
                offset_y,
                progress_pct,
                translate_y,
                video_scale,
            } => println!(
                "[scroll] y={offset_y:.0} progress={progress_pct:.1}% translate={translate_y:.1} scale={video_scale:.4}"
            ),
            Report::Carousel {
                counter,
                title,
                video,
                transitioning,
                outcome,
            } => println!(
                "[carousel] {counter} {title} ({video}) blurred={transitioning} request={outcome:?}"
            ),
            Report::Selection {
                name,
                hex,
                changing,
                outcome,
            } => println!("[bespoke] {name} {hex} changing={changing} request={outcome:?}"),
            Report::Cursor { x, y, scale } => println!("[cursor] ({x:.0}, {y:.0}) scale={scale}"),
        }
        Ok(())
    }
}
