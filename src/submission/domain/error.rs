//! Domain validation errors for the submission workflow.

use super::{AnswerId, AnswerStatus};
use thiserror::Error;

/// Validation failures raised by submission domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionDomainError {
    /// Grade value outside the accepted 0 to 100 range.
    #[error("grade must be between 0 and 100, got {0}")]
    InvalidGrade(i32),

    /// Attempted status change not permitted by the forward-only machine.
    #[error("answer {answer_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Answer whose status change was rejected.
        answer_id: AnswerId,
        /// Status the answer currently holds.
        from: AnswerStatus,
        /// Status the caller asked for.
        to: AnswerStatus,
    },

    /// Attempted edit of an answer that has left the editable state.
    #[error("answer {answer_id} is {status} and can no longer be edited")]
    NotEditable {
        /// Answer whose edit was rejected.
        answer_id: AnswerId,
        /// Status the answer currently holds.
        status: AnswerStatus,
    },

    /// Submission message was empty or whitespace.
    #[error("answer message must not be empty")]
    EmptyMessage,
}

/// Raised when a stored status string does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown answer status: {0}")]
pub struct ParseAnswerStatusError(pub String);
