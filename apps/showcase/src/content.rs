//! Static content and the route table for the tour.

use anyhow::Result;
use shared::domain::{HexColor, Slide, SlideId, Swatch, SwatchId};
use view_core::PagePlan;

pub const ROUTES: [&str; 4] = ["/", "/models", "/gallery", "/bespoke"];

fn slide(id: u32, title: &str, subtitle: &str, hex: &str, video: &str) -> Result<Slide> {
    Ok(Slide {
        id: SlideId(id),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        hex: HexColor::parse(hex)?,
        video: video.to_string(),
    })
}

fn swatch(id: u32, name: &str, hex: &str, video: &str) -> Result<Swatch> {
    Ok(Swatch {
        id: SwatchId(id),
        name: name.to_string(),
        hex: HexColor::parse(hex)?,
        video: video.to_string(),
    })
}

pub fn gallery_slides() -> Result<Vec<Slide>> {
    Ok(vec![
        slide(1, "PHANTOM", "The Magnum Opus", "#0F0F0F", "/images/bughatti.mp4")?,
        slide(2, "SPECTRE", "Electric Prophecy", "#0A1015", "/images/dodge.mp4")?,
        slide(3, "CULLINAN", "Peak Capability", "#080808", "/images/porche.mp4")?,
    ])
}

pub fn bespoke_swatches() -> Result<Vec<Swatch>> {
    Ok(vec![
        swatch(1, "GHOST WHITE", "#F8F8F8", "/images/phantom.mp4")?,
        swatch(2, "TEMPEST BLUE", "#1B2631", "/images/dodge.mp4")?,
        swatch(3, "BLACK BADGE", "#0A0A0A", "/images/porche.mp4")?,
    ])
}

/// Page plan for `path`, or `None` for paths outside the route table.
pub fn plan_for(path: &str, preload: bool) -> Result<Option<PagePlan>> {
    let base = if preload {
        PagePlan::preloaded()
    } else {
        PagePlan::immediate()
    };

    let plan = match path {
        "/" => PagePlan::immediate(),
        "/models" => base,
        "/gallery" => base.with_slides(gallery_slides()?).with_cursor(),
        "/bespoke" => base.with_swatches(bespoke_swatches()?),
        _ => return Ok(None),
    };
    Ok(Some(plan))
}
