//! Submission bounded context.
//!
//! Students hand in one answer per task and may edit it until grading
//! begins. Checkers grade submitted answers and hand them back, driving a
//! forward-only lifecycle from submitted through graded to returned.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
