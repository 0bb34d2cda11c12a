//! Diesel table definition for answer persistence.

diesel::table! {
    /// Student answers, one per (task, student) pair.
    answers (id) {
        /// Store-assigned answer identifier.
        id -> Int8,
        /// Answered task; rows cascade when the task is deleted.
        task_id -> Int8,
        /// Submitting student; rows cascade when the user is deleted.
        student_id -> Int8,
        /// Answer message text.
        message -> Text,
        /// Opaque file attachment metadata.
        files_metadata -> Jsonb,
        /// Opaque photo attachment metadata.
        photos_metadata -> Jsonb,
        /// Lifecycle status storage form.
        #[max_length = 20]
        status -> Varchar,
        /// Awarded grade, checked into 0 to 100 by the schema.
        grade -> Nullable<Int4>,
        /// Teacher comment.
        teacher_comment -> Nullable<Text>,
        /// Submission timestamp.
        add_at -> Timestamptz,
        /// Grading timestamp.
        graded_at -> Nullable<Timestamptz>,
    }
}
