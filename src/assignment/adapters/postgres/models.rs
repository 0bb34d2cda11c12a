//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Globally unique title.
    pub title: String,
    /// Assignment description text.
    pub description: String,
    /// Opaque file attachment metadata.
    pub files_metadata: Value,
    /// Opaque photo attachment metadata.
    pub photos_metadata: Value,
    /// Lesson the task belongs to.
    pub lesson_name: String,
    /// Lesson type storage form.
    pub lesson_type: String,
    /// Checker user reference.
    pub checker: i64,
    /// Specialty the task targets.
    pub specialty: String,
    /// Course number the task targets.
    pub course: i32,
    /// Submission deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Insert model for task records; the id comes from the store sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Globally unique title.
    pub title: String,
    /// Assignment description text.
    pub description: String,
    /// Opaque file attachment metadata.
    pub files_metadata: Value,
    /// Opaque photo attachment metadata.
    pub photos_metadata: Value,
    /// Lesson the task belongs to.
    pub lesson_name: String,
    /// Lesson type storage form.
    pub lesson_type: String,
    /// Checker user reference.
    pub checker: i64,
    /// Specialty the task targets.
    pub specialty: String,
    /// Course number the task targets.
    pub course: i32,
    /// Submission deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Full-row changeset applied on every task update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Globally unique title.
    pub title: String,
    /// Assignment description text.
    pub description: String,
    /// Opaque file attachment metadata.
    pub files_metadata: Value,
    /// Opaque photo attachment metadata.
    pub photos_metadata: Value,
    /// Lesson the task belongs to.
    pub lesson_name: String,
    /// Lesson type storage form.
    pub lesson_type: String,
    /// Checker user reference.
    pub checker: i64,
    /// Specialty the task targets.
    pub specialty: String,
    /// Course number the task targets.
    pub course: i32,
    /// Submission deadline.
    pub deadline: Option<DateTime<Utc>>,
}
