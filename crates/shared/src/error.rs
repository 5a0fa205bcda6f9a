use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{0}' must have exactly six hex digits")]
    Length(String),
    #[error("color '{0}' contains a non-hex digit")]
    Digit(String),
}
