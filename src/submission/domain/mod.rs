//! Domain model for student answers and their grading lifecycle.

mod answer;
mod error;
mod grade;
mod ids;
mod status;

pub use answer::{Answer, AnswerDraft, GradingState};
pub use error::{ParseAnswerStatusError, SubmissionDomainError};
pub use grade::Grade;
pub use ids::AnswerId;
pub use status::AnswerStatus;
