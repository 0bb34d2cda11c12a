//! Repository port for task persistence and lookup.

use crate::assignment::domain::{Task, TaskDraft, TaskId};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Title uniqueness is enforced inside the store so that concurrent
/// creations or renames cannot both succeed.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTitle`] when the title is
    /// taken, or [`TaskRepositoryError::UnknownChecker`] when the checker
    /// reference does not resolve to a user.
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::DuplicateTitle`] when a rename
    /// collides.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by exact title. Returns `None` when absent.
    async fn find_by_title(&self, title: &str) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks ordered by identifier.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task record; its answers cascade at the schema level.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Counts tasks naming the given user as checker.
    async fn count_by_checker(&self, checker: UserId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The title is already in use.
    #[error("task title already in use: {0}")]
    DuplicateTitle(String),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The checker reference does not resolve to a user record.
    #[error("checker user does not exist: {0}")]
    UnknownChecker(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
