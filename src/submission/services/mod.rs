//! Submission workflow and grading services.

mod grading;
mod workflow;

pub use grading::GradingService;
pub use workflow::{
    SubmissionService, SubmissionServiceError, SubmissionServiceResult, SubmitAnswerRequest,
    UpdateAnswerRequest,
};
