//! Domain model for the assignment registry.
//!
//! Tasks are staff-owned assignment definitions with a globally unique
//! title, lesson classification, opaque attachment metadata, and an
//! optional submission deadline.

mod error;
mod ids;
mod lesson;
mod task;

pub use error::{AssignmentDomainError, ParseLessonTypeError};
pub use ids::{TaskId, TaskTitle};
pub use lesson::LessonType;
pub use task::{Task, TaskDraft, TaskPatch};
