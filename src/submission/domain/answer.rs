//! Answer aggregate root and its unsaved draft form.

use super::{AnswerId, AnswerStatus, Grade, SubmissionDomainError};
use crate::assignment::domain::TaskId;
use crate::attachment::Attachment;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Student answer to a task.
///
/// Exactly one answer exists per (task, student) pair. Content stays
/// editable while the answer is [`AnswerStatus::Submitted`]; grading freezes
/// it and records the grade, teacher comment, and grading timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    id: AnswerId,
    task: TaskId,
    student: UserId,
    message: String,
    files: Vec<Attachment>,
    photos: Vec<Attachment>,
    status: AnswerStatus,
    grade: Option<Grade>,
    teacher_comment: Option<String>,
    add_at: DateTime<Utc>,
    graded_at: Option<DateTime<Utc>>,
}

/// Unsaved answer record awaiting a store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDraft {
    /// Task the answer responds to.
    pub task: TaskId,
    /// Student who handed the answer in.
    pub student: UserId,
    /// Answer message text.
    pub message: String,
    /// File attachment metadata.
    pub files: Vec<Attachment>,
    /// Photo attachment metadata.
    pub photos: Vec<Attachment>,
    /// Submission timestamp.
    pub add_at: DateTime<Utc>,
}

impl AnswerDraft {
    /// Creates a draft for a fresh submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::EmptyMessage`] when the message is
    /// empty or whitespace.
    pub fn new(
        task: TaskId,
        student: UserId,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, SubmissionDomainError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(SubmissionDomainError::EmptyMessage);
        }
        Ok(Self {
            task,
            student,
            message,
            files: Vec::new(),
            photos: Vec::new(),
            add_at: clock.utc(),
        })
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

/// Grading-side state of a stored answer, used when rehydrating rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradingState {
    /// Lifecycle status.
    pub status: AnswerStatus,
    /// Awarded grade, if graded.
    pub grade: Option<Grade>,
    /// Teacher comment, if any.
    pub teacher_comment: Option<String>,
    /// Grading timestamp, if graded.
    pub graded_at: Option<DateTime<Utc>>,
}

impl Answer {
    /// Materialises a persisted answer from its draft and store-assigned id.
    ///
    /// Fresh drafts always start in [`AnswerStatus::Submitted`] with no
    /// grade.
    #[must_use]
    pub fn from_draft(id: AnswerId, draft: AnswerDraft) -> Self {
        Self {
            id,
            task: draft.task,
            student: draft.student,
            message: draft.message,
            files: draft.files,
            photos: draft.photos,
            status: AnswerStatus::Submitted,
            grade: None,
            teacher_comment: None,
            add_at: draft.add_at,
            graded_at: None,
        }
    }

    /// Reconstructs a stored answer, including grading state.
    ///
    /// Intended for persistence adapters rehydrating rows.
    #[must_use]
    pub fn restore(id: AnswerId, draft: AnswerDraft, grading: GradingState) -> Self {
        Self {
            id,
            task: draft.task,
            student: draft.student,
            message: draft.message,
            files: draft.files,
            photos: draft.photos,
            status: grading.status,
            grade: grading.grade,
            teacher_comment: grading.teacher_comment,
            add_at: draft.add_at,
            graded_at: grading.graded_at,
        }
    }

    /// Returns the answer identifier.
    #[must_use]
    pub const fn id(&self) -> AnswerId {
        self.id
    }

    /// Returns the answered task id.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the submitting student id.
    #[must_use]
    pub const fn student(&self) -> UserId {
        self.student
    }

    /// Returns the answer message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the file attachment metadata.
    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    /// Returns the photo attachment metadata.
    #[must_use]
    pub fn photos(&self) -> &[Attachment] {
        &self.photos
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AnswerStatus {
        self.status
    }

    /// Returns the awarded grade, if graded.
    #[must_use]
    pub const fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Returns the teacher comment, if any.
    #[must_use]
    pub fn teacher_comment(&self) -> Option<&str> {
        self.teacher_comment.as_deref()
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn add_at(&self) -> DateTime<Utc> {
        self.add_at
    }

    /// Returns the grading timestamp, if graded.
    #[must_use]
    pub const fn graded_at(&self) -> Option<DateTime<Utc>> {
        self.graded_at
    }

    /// Replaces the message and appends attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::NotEditable`] once grading has
    /// started, or [`SubmissionDomainError::EmptyMessage`] when a
    /// replacement message is empty.
    pub fn update_content(
        &mut self,
        message: Option<String>,
        files: Vec<Attachment>,
        photos: Vec<Attachment>,
    ) -> Result<(), SubmissionDomainError> {
        if self.status != AnswerStatus::Submitted {
            return Err(SubmissionDomainError::NotEditable {
                answer_id: self.id,
                status: self.status,
            });
        }
        if let Some(message) = message {
            if message.trim().is_empty() {
                return Err(SubmissionDomainError::EmptyMessage);
            }
            self.message = message;
        }
        self.files.extend(files);
        self.photos.extend(photos);
        Ok(())
    }

    /// Records a grade, moving the answer to [`AnswerStatus::Graded`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::InvalidStateTransition`] unless the
    /// answer is currently [`AnswerStatus::Submitted`].
    pub fn record_grade(
        &mut self,
        grade: Grade,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), SubmissionDomainError> {
        self.transition_to(AnswerStatus::Graded)?;
        self.grade = Some(grade);
        self.teacher_comment = comment;
        self.graded_at = Some(clock.utc());
        Ok(())
    }

    /// Hands the answer back, moving it to the terminal
    /// [`AnswerStatus::Returned`] state and replacing the teacher comment.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::InvalidStateTransition`] unless the
    /// answer is currently [`AnswerStatus::Graded`].
    pub fn mark_returned(&mut self, comment: String) -> Result<(), SubmissionDomainError> {
        self.transition_to(AnswerStatus::Returned)?;
        self.teacher_comment = Some(comment);
        Ok(())
    }

    fn transition_to(&mut self, next: AnswerStatus) -> Result<(), SubmissionDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(SubmissionDomainError::InvalidStateTransition {
                answer_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
