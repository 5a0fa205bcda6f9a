use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

use crate::error::ConfigError;

/// Timing and coefficient constants handed to every view machine at
/// construction. Values are never mutated after validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub preload: PreloadTiming,
    pub carousel: CarouselTiming,
    pub swap: SwapTiming,
    pub parallax: ParallaxCoefficients,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreloadTiming {
    pub step: u8,
    pub cadence_ms: u64,
    pub reveal_grace_ms: u64,
}

impl Default for PreloadTiming {
    fn default() -> Self {
        Self {
            step: 1,
            cadence_ms: 30,
            reveal_grace_ms: 800,
        }
    }
}

impl PreloadTiming {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    pub fn reveal_grace(&self) -> Duration {
        Duration::from_millis(self.reveal_grace_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CarouselTiming {
    pub transition_ms: u64,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            transition_ms: 1000,
        }
    }
}

impl CarouselTiming {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwapTiming {
    pub fade_ms: u64,
}

impl Default for SwapTiming {
    fn default() -> Self {
        Self { fade_ms: 600 }
    }
}

impl SwapTiming {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxCoefficients {
    pub translate: f64,
    pub video_scale: f64,
}

impl Default for ParallaxCoefficients {
    fn default() -> Self {
        Self {
            translate: 0.5,
            video_scale: 0.0001,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.preload.step) {
            return Err(ConfigError::InvalidStep(self.preload.step));
        }

        let durations = [
            ("preload.cadence_ms", self.preload.cadence_ms),
            ("preload.reveal_grace_ms", self.preload.reveal_grace_ms),
            ("carousel.transition_ms", self.carousel.transition_ms),
            ("swap.fade_ms", self.swap.fade_ms),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::ZeroDuration { field: *field });
        }

        let coefficients = [
            ("parallax.translate", self.parallax.translate),
            ("parallax.video_scale", self.parallax.video_scale),
        ];
        if let Some((field, value)) = coefficients.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: *field,
                value: *value,
            });
        }

        Ok(())
    }
}

/// Reads `path` if it exists, layers `APP__*` environment overrides on top and
/// validates the result.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<MotionConfig> {
    let path = path.as_ref();
    let mut config = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<MotionConfig>(&raw)
            .with_context(|| format!("failed to parse motion config '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => MotionConfig::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read motion config '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(
    config: &mut MotionConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> anyhow::Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        raw.trim()
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for {key}"))
    }

    if let Some(v) = lookup("APP__PRELOAD_STEP") {
        config.preload.step = parse("APP__PRELOAD_STEP", &v)?;
    }
    if let Some(v) = lookup("APP__PRELOAD_CADENCE_MS") {
        config.preload.cadence_ms = parse("APP__PRELOAD_CADENCE_MS", &v)?;
    }
    if let Some(v) = lookup("APP__PRELOAD_REVEAL_GRACE_MS") {
        config.preload.reveal_grace_ms = parse("APP__PRELOAD_REVEAL_GRACE_MS", &v)?;
    }
    if let Some(v) = lookup("APP__CAROUSEL_TRANSITION_MS") {
        config.carousel.transition_ms = parse("APP__CAROUSEL_TRANSITION_MS", &v)?;
    }
    if let Some(v) = lookup("APP__SWAP_FADE_MS") {
        config.swap.fade_ms = parse("APP__SWAP_FADE_MS", &v)?;
    }
    if let Some(v) = lookup("APP__PARALLAX_TRANSLATE") {
        config.parallax.translate = parse("APP__PARALLAX_TRANSLATE", &v)?;
    }
    if let Some(v) = lookup("APP__PARALLAX_VIDEO_SCALE") {
        config.parallax.video_scale = parse("APP__PARALLAX_VIDEO_SCALE", &v)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
