//! Unit tests for the identity module.
//!
//! Tests are organised by domain concept, covering happy paths, error cases,
//! and edge cases for all public APIs.

mod role_tests;
mod service_tests;
mod user_tests;
