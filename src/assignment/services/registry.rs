//! Service layer for staff-owned task management.

use crate::assignment::{
    domain::{AssignmentDomainError, LessonType, Task, TaskDraft, TaskId, TaskPatch, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::attachment::Attachment;
use crate::identity::domain::{User, UserId};
use crate::submission::ports::{AnswerRepository, AnswerRepositoryError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    lesson_name: String,
    lesson_type: LessonType,
    specialty: String,
    course: i32,
    deadline: Option<DateTime<Utc>>,
    files: Vec<Attachment>,
    photos: Vec<Attachment>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        lesson_name: impl Into<String>,
        lesson_type: LessonType,
        specialty: impl Into<String>,
        course: i32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            lesson_name: lesson_name.into(),
            lesson_type,
            specialty: specialty.into(),
            course,
            deadline: None,
            files: Vec::new(),
            photos: Vec::new(),
        }
    }

    /// Sets the submission deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets file attachment metadata.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = Attachment>) -> Self {
        self.files = files.into_iter().collect();
        self
    }

    /// Sets photo attachment metadata.
    #[must_use]
    pub fn with_photos(mut self, photos: impl IntoIterator<Item = Attachment>) -> Self {
        self.photos = photos.into_iter().collect();
        self
    }
}

/// Service-level errors for assignment registry operations.
#[derive(Debug, Error)]
pub enum AssignmentServiceError {
    /// The caller's role or checker identity does not permit the operation.
    #[error("caller lacks permission for this operation")]
    Forbidden,

    /// The title is already in use.
    #[error("task title already in use: {0}")]
    DuplicateTitle(String),

    /// The task does not exist.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),

    /// The checker reference does not resolve to a user record.
    #[error("checker user does not exist: {0}")]
    UnknownChecker(UserId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AssignmentDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// Answer repository operation failed during cascade removal.
    #[error(transparent)]
    Answers(#[from] AnswerRepositoryError),
}

impl From<TaskRepositoryError> for AssignmentServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::DuplicateTitle(title) => Self::DuplicateTitle(title),
            TaskRepositoryError::NotFound(id) => Self::UnknownTask(id),
            TaskRepositoryError::UnknownChecker(id) => Self::UnknownChecker(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for assignment service operations.
pub type AssignmentServiceResult<T> = Result<T, AssignmentServiceError>;

/// Assignment registry orchestration service.
///
/// The answer repository participates only in task deletion, where all
/// answers to the task cascade; the relational schema's `ON DELETE CASCADE`
/// backs the same behaviour up underneath the `PostgreSQL` adapter.
#[derive(Clone)]
pub struct AssignmentService<T, A>
where
    T: TaskRepository,
    A: AnswerRepository,
{
    tasks: Arc<T>,
    answers: Arc<A>,
}

impl<T, A> AssignmentService<T, A>
where
    T: TaskRepository,
    A: AnswerRepository,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, answers: Arc<A>) -> Self {
        Self { tasks, answers }
    }

    /// Creates a task owned and graded by `checker`.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Forbidden`] when the checker is not
    /// staff, [`AssignmentServiceError::DuplicateTitle`] when the title is
    /// taken, or a validation error for malformed input.
    pub async fn create_task(
        &self,
        checker: &User,
        request: CreateTaskRequest,
    ) -> AssignmentServiceResult<Task> {
        if !checker.role().is_staff() {
            return Err(AssignmentServiceError::Forbidden);
        }
        if request.course <= 0 {
            return Err(AssignmentDomainError::InvalidCourse(request.course).into());
        }

        let title = TaskTitle::new(request.title)?;
        let mut draft = TaskDraft::new(
            title,
            request.description,
            request.lesson_name,
            request.lesson_type,
            checker.id(),
            request.specialty,
            request.course,
        )
        .with_files(request.files)
        .with_photos(request.photos);
        draft.deadline = request.deadline;

        Ok(self.tasks.create(draft).await?)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Forbidden`] unless the actor is the
    /// task's checker or an administrator, and
    /// [`AssignmentServiceError::DuplicateTitle`] when a rename collides.
    pub async fn update_task(
        &self,
        actor: &User,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> AssignmentServiceResult<Task> {
        let mut task = self.fetch_task(task_id).await?;
        authorize_checker(actor, &task)?;

        task.apply_patch(patch);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Reassigns a task to a new staff checker.
    ///
    /// Used to clear checker references ahead of removing a staff account.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Forbidden`] unless the actor is the
    /// current checker or an administrator, or when the new checker is not
    /// staff.
    pub async fn reassign_checker(
        &self,
        actor: &User,
        task_id: TaskId,
        new_checker: &User,
    ) -> AssignmentServiceResult<Task> {
        let mut task = self.fetch_task(task_id).await?;
        authorize_checker(actor, &task)?;
        if !new_checker.role().is_staff() {
            return Err(AssignmentServiceError::Forbidden);
        }

        task.reassign_checker(new_checker.id());
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task together with every answer submitted against it.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Forbidden`] unless the actor is the
    /// task's checker or an administrator.
    pub async fn delete_task(&self, actor: &User, task_id: TaskId) -> AssignmentServiceResult<()> {
        let task = self.fetch_task(task_id).await?;
        authorize_checker(actor, &task)?;

        self.answers.delete_by_task(task_id).await?;
        self.tasks.delete(task_id).await?;
        Ok(())
    }

    /// Looks up a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Repository`] on persistence failure.
    pub async fn get_task(&self, task_id: TaskId) -> AssignmentServiceResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Returns all tasks ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::Repository`] on persistence failure.
    pub async fn list_tasks(&self) -> AssignmentServiceResult<Vec<Task>> {
        Ok(self.tasks.list().await?)
    }

    async fn fetch_task(&self, task_id: TaskId) -> AssignmentServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AssignmentServiceError::UnknownTask(task_id))
    }
}

/// Permits the task's checker and administrators, nobody else.
fn authorize_checker(actor: &User, task: &Task) -> AssignmentServiceResult<()> {
    if task.checker() == actor.id() || actor.role().is_admin() {
        return Ok(());
    }
    Err(AssignmentServiceError::Forbidden)
}
