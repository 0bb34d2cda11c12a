//! Unit tests for the submission module.
//!
//! Tests are organised by domain concept, covering happy paths, error cases,
//! and edge cases for all public APIs.

mod answer_tests;
mod status_tests;
