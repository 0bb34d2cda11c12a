//! `PostgreSQL` adapters for answer persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresAnswerRepository, SubmissionPgPool};
