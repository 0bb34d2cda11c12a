//! Validated grade value.

use super::SubmissionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grade awarded to an answer, validated into the 0 to 100 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Grade(i32);

impl Grade {
    /// Validates a raw grade value.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::InvalidGrade`] for values outside
    /// 0 to 100 inclusive.
    pub fn new(value: i32) -> Result<Self, SubmissionDomainError> {
        if !(0..=100).contains(&value) {
            return Err(SubmissionDomainError::InvalidGrade(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw grade value.
    #[must_use]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
