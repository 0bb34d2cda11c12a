//! Answer lifecycle states and the forward-only transition rules.

use super::ParseAnswerStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an answer.
///
/// The machine only moves forward: `Submitted` to `Graded` to `Returned`.
/// There is no path back, and `Returned` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerStatus {
    /// Handed in by the student and still editable.
    #[default]
    Submitted,
    /// Graded by the checker; grade and comment recorded.
    Graded,
    /// Handed back to the student. Terminal.
    Returned,
}

impl AnswerStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Graded => "GRADED",
            Self::Returned => "RETURNED",
        }
    }

    /// Returns `true` when the machine permits moving to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Submitted, Self::Graded) | (Self::Graded, Self::Returned)
        )
    }

    /// Returns `true` for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Returned)
    }
}

impl TryFrom<&str> for AnswerStatus {
    type Error = ParseAnswerStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "SUBMITTED" => Ok(Self::Submitted),
            "GRADED" => Ok(Self::Graded),
            "RETURNED" => Ok(Self::Returned),
            _ => Err(ParseAnswerStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
