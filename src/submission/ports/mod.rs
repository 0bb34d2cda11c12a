//! Ports exposed by the submission context.

mod repository;

pub use repository::{AnswerRepository, AnswerRepositoryError, AnswerRepositoryResult};
