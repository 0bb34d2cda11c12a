//! Task aggregate root, its unsaved draft form, and the update patch.

use super::{LessonType, TaskId, TaskTitle};
use crate::attachment::Attachment;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Identity fields (`id`, once assigned) are immutable; everything else is
/// editable by the checker or an administrator through [`TaskPatch`]. The
/// checker reference never cascades: removing a checker user is blocked
/// until the task is reassigned or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    lesson_name: String,
    lesson_type: LessonType,
    files: Vec<Attachment>,
    photos: Vec<Attachment>,
    checker: UserId,
    specialty: String,
    course: i32,
    deadline: Option<DateTime<Utc>>,
}

/// Unsaved task record awaiting a store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Globally unique title.
    pub title: TaskTitle,
    /// Assignment description text.
    pub description: String,
    /// Lesson the task belongs to.
    pub lesson_name: String,
    /// Kind of lesson.
    pub lesson_type: LessonType,
    /// File attachment metadata.
    pub files: Vec<Attachment>,
    /// Photo attachment metadata.
    pub photos: Vec<Attachment>,
    /// Staff user who owns and grades the task.
    pub checker: UserId,
    /// Specialty the task targets.
    pub specialty: String,
    /// Course number the task targets.
    pub course: i32,
    /// Submission deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the required fields and no attachments.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: impl Into<String>,
        lesson_name: impl Into<String>,
        lesson_type: LessonType,
        checker: UserId,
        specialty: impl Into<String>,
        course: i32,
    ) -> Self {
        Self {
            title,
            description: description.into(),
            lesson_name: lesson_name.into(),
            lesson_type,
            files: Vec::new(),
            photos: Vec::new(),
            checker,
            specialty: specialty.into(),
            course,
            deadline: None,
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

/// Partial update applied to a task by its checker or an administrator.
///
/// Unset fields are left untouched; attachment lists append to the existing
/// metadata rather than replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    lesson_name: Option<String>,
    lesson_type: Option<LessonType>,
    specialty: Option<String>,
    course: Option<i32>,
    deadline: Option<Option<DateTime<Utc>>>,
    files: Vec<Attachment>,
    photos: Vec<Attachment>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task; uniqueness is enforced on persist.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the lesson name.
    #[must_use]
    pub fn with_lesson_name(mut self, lesson_name: impl Into<String>) -> Self {
        self.lesson_name = Some(lesson_name.into());
        self
    }

    /// Replaces the lesson type.
    #[must_use]
    pub const fn with_lesson_type(mut self, lesson_type: LessonType) -> Self {
        self.lesson_type = Some(lesson_type);
        self
    }

    /// Replaces the specialty.
    #[must_use]
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Replaces the course number.
    #[must_use]
    pub const fn with_course(mut self, course: i32) -> Self {
        self.course = Some(course);
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(Some(deadline));
        self
    }

    /// Removes the deadline, leaving the task open-ended.
    #[must_use]
    pub const fn without_deadline(mut self) -> Self {
        self.deadline = Some(None);
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

    /// Returns the pending title rename, if any.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }
}

impl Task {
    /// Materialises a persisted task from its draft and store-assigned id.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            lesson_name: draft.lesson_name,
            lesson_type: draft.lesson_type,
            files: draft.files,
            photos: draft.photos,
            checker: draft.checker,
            specialty: draft.specialty,
            course: draft.course,
            deadline: draft.deadline,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lesson name.
    #[must_use]
    pub fn lesson_name(&self) -> &str {
        &self.lesson_name
    }

    /// Returns the lesson type.
    #[must_use]
    pub const fn lesson_type(&self) -> LessonType {
        self.lesson_type
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

    /// Returns the checker user id.
    #[must_use]
    pub const fn checker(&self) -> UserId {
        self.checker
    }

    /// Returns the targeted specialty.
    #[must_use]
    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    /// Returns the targeted course number.
    #[must_use]
    pub const fn course(&self) -> i32 {
        self.course
    }

    /// Returns the submission deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns `true` when a deadline exists and lies strictly before `now`.
    #[must_use]
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Applies a partial update in place.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            lesson_name,
            lesson_type,
            specialty,
            course,
            deadline,
            files,
            photos,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(lesson_name) = lesson_name {
            self.lesson_name = lesson_name;
        }
        if let Some(lesson_type) = lesson_type {
            self.lesson_type = lesson_type;
        }
        if let Some(specialty) = specialty {
            self.specialty = specialty;
        }
        if let Some(course) = course {
            self.course = course;
        }
        if let Some(deadline) = deadline {
            self.deadline = deadline;
        }
        self.files.extend(files);
        self.photos.extend(photos);
    }

    /// Reassigns the checker reference.
    pub const fn reassign_checker(&mut self, checker: UserId) {
        self.checker = checker;
    }
}
