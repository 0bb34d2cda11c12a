//! Service layer for submitting and maintaining answers.

use crate::assignment::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::attachment::Attachment;
use crate::identity::domain::{User, UserId};
use crate::submission::{
    domain::{Answer, AnswerDraft, AnswerId, AnswerStatus, SubmissionDomainError},
    ports::{AnswerRepository, AnswerRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for handing in an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAnswerRequest {
    message: String,
    files: Vec<Attachment>,
    photos: Vec<Attachment>,
}

impl SubmitAnswerRequest {
    /// Creates a request with the answer message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            files: Vec::new(),
            photos: Vec::new(),
        }
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

/// Request payload for editing an answer still awaiting grading.
///
/// An unset message leaves the stored text untouched; attachment metadata
/// always appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAnswerRequest {
    message: Option<String>,
    files: Vec<Attachment>,
    photos: Vec<Attachment>,
}

impl UpdateAnswerRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the answer message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Appends file attachment metadata.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = Attachment>) -> Self {
        self.files = files.into_iter().collect();
        self
    }

    /// Appends photo attachment metadata.
    #[must_use]
    pub fn with_photos(mut self, photos: impl IntoIterator<Item = Attachment>) -> Self {
        self.photos = photos.into_iter().collect();
        self
    }
}

/// Service-level errors for submission and grading operations.
#[derive(Debug, Error)]
pub enum SubmissionServiceError {
    /// The caller's role or ownership does not permit the operation.
    #[error("caller lacks permission for this operation")]
    Forbidden,

    /// The task does not exist.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),

    /// The answer does not exist.
    #[error("answer not found: {0}")]
    UnknownAnswer(AnswerId),

    /// The (task, student) pair already has an answer.
    #[error("student {student} already answered task {task}")]
    DuplicateSubmission {
        /// Task the duplicate targeted.
        task: TaskId,
        /// Student who attempted the duplicate.
        student: UserId,
    },

    /// The task's deadline has passed.
    #[error("deadline for task {0} has passed")]
    DeadlinePassed(TaskId),

    /// Domain validation or lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] SubmissionDomainError),

    /// Answer repository operation failed.
    #[error(transparent)]
    Answers(AnswerRepositoryError),

    /// Task repository operation failed during task lookups.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl From<AnswerRepositoryError> for SubmissionServiceError {
    fn from(err: AnswerRepositoryError) -> Self {
        match err {
            AnswerRepositoryError::DuplicateSubmission { task, student } => {
                Self::DuplicateSubmission { task, student }
            }
            AnswerRepositoryError::NotFound(id) => Self::UnknownAnswer(id),
            other => Self::Answers(other),
        }
    }
}

/// Result type for submission and grading service operations.
pub type SubmissionServiceResult<T> = Result<T, SubmissionServiceError>;

/// Submission workflow orchestration service.
///
/// Students hand in at most one answer per task and may edit or withdraw it
/// until grading begins. The task repository supplies deadline and checker
/// information.
#[derive(Clone)]
pub struct SubmissionService<A, T, C>
where
    A: AnswerRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    answers: Arc<A>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<A, T, C> SubmissionService<A, T, C>
where
    A: AnswerRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new submission service.
    #[must_use]
    pub const fn new(answers: Arc<A>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            answers,
            tasks,
            clock,
        }
    }

    /// Hands in a student's answer to a task.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Forbidden`] for non-student callers,
    /// [`SubmissionServiceError::DeadlinePassed`] after the task deadline,
    /// and [`SubmissionServiceError::DuplicateSubmission`] when the student
    /// already answered the task.
    pub async fn submit_answer(
        &self,
        student: &User,
        task_id: TaskId,
        request: SubmitAnswerRequest,
    ) -> SubmissionServiceResult<Answer> {
        if student.role().is_staff() {
            return Err(SubmissionServiceError::Forbidden);
        }
        let task = self.fetch_task(task_id).await?;
        if task.deadline_passed(self.clock.utc()) {
            return Err(SubmissionServiceError::DeadlinePassed(task_id));
        }

        let draft = AnswerDraft::new(task_id, student.id(), request.message, self.clock.as_ref())?
            .with_files(request.files)
            .with_photos(request.photos);
        Ok(self.answers.create(draft).await?)
    }

    /// Edits an answer that is still awaiting grading.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Forbidden`] unless the caller owns
    /// the answer, and [`SubmissionDomainError::NotEditable`] once grading
    /// has started.
    pub async fn update_answer(
        &self,
        student: &User,
        answer_id: AnswerId,
        request: UpdateAnswerRequest,
    ) -> SubmissionServiceResult<Answer> {
        let mut answer = self.fetch_answer(answer_id).await?;
        if answer.student() != student.id() {
            return Err(SubmissionServiceError::Forbidden);
        }

        answer.update_content(request.message, request.files, request.photos)?;
        self.answers.update(&answer).await?;
        Ok(answer)
    }

    /// Withdraws an answer that is still awaiting grading.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Forbidden`] unless the caller owns
    /// the answer, and [`SubmissionDomainError::NotEditable`] once grading
    /// has started.
    pub async fn withdraw_answer(
        &self,
        student: &User,
        answer_id: AnswerId,
    ) -> SubmissionServiceResult<()> {
        let answer = self.fetch_answer(answer_id).await?;
        if answer.student() != student.id() {
            return Err(SubmissionServiceError::Forbidden);
        }
        if answer.status() != AnswerStatus::Submitted {
            return Err(SubmissionDomainError::NotEditable {
                answer_id,
                status: answer.status(),
            }
            .into());
        }

        self.answers.delete(answer_id).await?;
        Ok(())
    }

    /// Lists all answers to a task for its checker or an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Forbidden`] unless the actor is the
    /// task's checker or an administrator.
    pub async fn answers_for_task(
        &self,
        actor: &User,
        task_id: TaskId,
    ) -> SubmissionServiceResult<Vec<Answer>> {
        let task = self.fetch_task(task_id).await?;
        authorize_checker(actor, &task)?;
        Ok(self.answers.list_by_task(task_id).await?)
    }

    /// Lists the answers a student has handed in.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionServiceError::Answers`] on persistence failure.
    pub async fn answers_by_student(&self, student: &User) -> SubmissionServiceResult<Vec<Answer>> {
        Ok(self.answers.list_by_student(student.id()).await?)
    }

    async fn fetch_task(&self, task_id: TaskId) -> SubmissionServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(SubmissionServiceError::UnknownTask(task_id))
    }

    async fn fetch_answer(&self, answer_id: AnswerId) -> SubmissionServiceResult<Answer> {
        self.answers
            .find_by_id(answer_id)
            .await?
            .ok_or(SubmissionServiceError::UnknownAnswer(answer_id))
    }
}

/// Permits the task's checker and administrators, nobody else.
pub(super) fn authorize_checker(actor: &User, task: &Task) -> SubmissionServiceResult<()> {
    if task.checker() == actor.id() || actor.role().is_admin() {
        return Ok(());
    }
    Err(SubmissionServiceError::Forbidden)
}
