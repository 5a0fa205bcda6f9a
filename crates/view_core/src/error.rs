use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("preload step must be within 1..=100, got {0}")]
    InvalidStep(u8),
    #[error("{field} must be a non-zero duration")]
    ZeroDuration { field: &'static str },
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Construction-time failures. Requests against a built machine never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("invalid motion config: {0}")]
    Config(#[from] ConfigError),
    #[error("carousel needs at least one slide")]
    EmptyCarousel,
    #[error("selection needs at least one option")]
    EmptySelection,
    #[error("initial selection {0} is not one of the options")]
    UnknownInitialSelection(String),
}
