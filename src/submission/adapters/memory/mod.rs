//! In-memory adapters for the submission ports.

mod answer;

pub use answer::InMemoryAnswerRepository;
