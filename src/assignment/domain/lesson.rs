//! Lesson classification for tasks.

use super::ParseLessonTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of lesson a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonType {
    /// Lecture material.
    Lecture,
    /// Practice session.
    Practice,
    /// Laboratory work.
    Lab,
}

impl LessonType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lecture => "LECTURE",
            Self::Practice => "PRACTICE",
            Self::Lab => "LAB",
        }
    }
}

impl TryFrom<&str> for LessonType {
    type Error = ParseLessonTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LECTURE" => Ok(Self::Lecture),
            "PRACTICE" => Ok(Self::Practice),
            "LAB" => Ok(Self::Lab),
            _ => Err(ParseLessonTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
