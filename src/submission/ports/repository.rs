//! Repository port for answer persistence and lookup.

use crate::assignment::domain::TaskId;
use crate::identity::domain::UserId;
use crate::submission::domain::{Answer, AnswerDraft, AnswerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for answer repository operations.
pub type AnswerRepositoryResult<T> = Result<T, AnswerRepositoryError>;

/// Answer persistence contract.
///
/// The one-answer-per-task-per-student rule is enforced inside the store so
/// that concurrent submissions cannot both succeed.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persists a new answer and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerRepositoryError::DuplicateSubmission`] when the
    /// (task, student) pair already has an answer.
    async fn create(&self, draft: AnswerDraft) -> AnswerRepositoryResult<Answer>;

    /// Persists changes to an existing answer.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerRepositoryError::NotFound`] when the answer does not
    /// exist.
    async fn update(&self, answer: &Answer) -> AnswerRepositoryResult<()>;

    /// Finds an answer by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: AnswerId) -> AnswerRepositoryResult<Option<Answer>>;

    /// Finds the answer a student handed in for a task, if any.
    async fn find_by_task_and_student(
        &self,
        task: TaskId,
        student: UserId,
    ) -> AnswerRepositoryResult<Option<Answer>>;

    /// Returns all answers to a task ordered by identifier.
    async fn list_by_task(&self, task: TaskId) -> AnswerRepositoryResult<Vec<Answer>>;

    /// Returns all answers a student has handed in, ordered by identifier.
    async fn list_by_student(&self, student: UserId) -> AnswerRepositoryResult<Vec<Answer>>;

    /// Removes a single answer record.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerRepositoryError::NotFound`] when the answer does not
    /// exist.
    async fn delete(&self, id: AnswerId) -> AnswerRepositoryResult<()>;

    /// Removes every answer to a task; returns the number removed.
    async fn delete_by_task(&self, task: TaskId) -> AnswerRepositoryResult<u64>;

    /// Removes every answer a student handed in; returns the number removed.
    async fn delete_by_student(&self, student: UserId) -> AnswerRepositoryResult<u64>;
}

/// Errors returned by answer repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AnswerRepositoryError {
    /// The (task, student) pair already has an answer.
    #[error("student {student} already answered task {task}")]
    DuplicateSubmission {
        /// Task the duplicate targeted.
        task: TaskId,
        /// Student who attempted the duplicate.
        student: UserId,
    },

    /// The answer was not found.
    #[error("answer not found: {0}")]
    NotFound(AnswerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AnswerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
