//! In-memory adapters for assignment persistence.

mod task;

pub use task::InMemoryTaskRepository;
