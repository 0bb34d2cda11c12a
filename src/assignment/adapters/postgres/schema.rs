//! Diesel schema for task persistence.

diesel::table! {
    /// Staff-owned assignment definitions.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Globally unique title.
        #[max_length = 255]
        title -> Varchar,
        /// Assignment description text.
        description -> Text,
        /// Opaque file attachment metadata.
        files_metadata -> Jsonb,
        /// Opaque photo attachment metadata.
        photos_metadata -> Jsonb,
        /// Lesson the task belongs to.
        #[max_length = 255]
        lesson_name -> Varchar,
        /// Kind of lesson.
        #[max_length = 20]
        lesson_type -> Varchar,
        /// Checker user reference; no cascade on user deletion.
        checker -> Int8,
        /// Specialty the task targets.
        #[max_length = 255]
        specialty -> Varchar,
        /// Course number the task targets.
        course -> Int4,
        /// Submission deadline.
        deadline -> Nullable<Timestamptz>,
    }
}
