//! Diesel row models for answer persistence.

use super::schema::answers;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for answer records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnswerRow {
    /// Store-assigned answer identifier.
    pub id: i64,
    /// Answered task reference.
    pub task_id: i64,
    /// Submitting student reference.
    pub student_id: i64,
    /// Answer message text.
    pub message: String,
    /// Opaque file attachment metadata.
    pub files_metadata: Value,
    /// Opaque photo attachment metadata.
    pub photos_metadata: Value,
    /// Lifecycle status storage form.
    pub status: String,
    /// Awarded grade.
    pub grade: Option<i32>,
    /// Teacher comment.
    pub teacher_comment: Option<String>,
    /// Submission timestamp.
    pub add_at: DateTime<Utc>,
    /// Grading timestamp.
    pub graded_at: Option<DateTime<Utc>>,
}

/// Insert model for answer records; the id comes from the store sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = answers)]
pub struct NewAnswerRow {
    /// Answered task reference.
    pub task_id: i64,
    /// Submitting student reference.
    pub student_id: i64,
    /// Answer message text.
    pub message: String,
    /// Opaque file attachment metadata.
    pub files_metadata: Value,
    /// Opaque photo attachment metadata.
    pub photos_metadata: Value,
    /// Lifecycle status storage form.
    pub status: String,
    /// Submission timestamp.
    pub add_at: DateTime<Utc>,
}

/// Full-row changeset applied on every answer update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = answers)]
#[diesel(treat_none_as_null = true)]
pub struct AnswerChangeset {
    /// Answer message text.
    pub message: String,
    /// Opaque file attachment metadata.
    pub files_metadata: Value,
    /// Opaque photo attachment metadata.
    pub photos_metadata: Value,
    /// Lifecycle status storage form.
    pub status: String,
    /// Awarded grade.
    pub grade: Option<i32>,
    /// Teacher comment.
    pub teacher_comment: Option<String>,
    /// Grading timestamp.
    pub graded_at: Option<DateTime<Utc>>,
}
