use serde::{Deserialize, Serialize};

/// Result of a user-driven request against one of the view machines.
///
/// Ignored requests leave state untouched and schedule nothing; they are never
/// queued for later.
#[must_use = "an ignored request leaves state untouched; check whether it was accepted"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Outcome::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// A transition is already in flight.
    Busy,
    /// The requested option is the one already shown.
    AlreadySelected,
    /// The sequence was started before and has not been torn down.
    AlreadyStarted,
    /// The requested option is not one of the configured options.
    UnknownOption,
}
