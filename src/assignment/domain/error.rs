//! Error types for assignment domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing assignment domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentDomainError {
    /// The title is empty after trimming or exceeds the schema limit.
    #[error("invalid task title: '{0}'")]
    InvalidTitle(String),

    /// The course number is not positive.
    #[error("invalid course number {0}, expected a positive integer")]
    InvalidCourse(i32),
}

/// Error returned while parsing lesson types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lesson type: {0}")]
pub struct ParseLessonTypeError(pub String);
