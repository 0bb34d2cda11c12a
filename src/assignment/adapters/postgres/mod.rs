//! `PostgreSQL` adapters for assignment persistence.

mod models;
mod repository;
mod schema;

pub use repository::{AssignmentPgPool, PostgresTaskRepository};
