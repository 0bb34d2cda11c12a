//! Assignment registry bounded context.
//!
//! Staff create and maintain the catalogue of tasks students answer. Tasks
//! carry lesson metadata, attachment references, an optional deadline, and a
//! checker reference identifying the staff member who grades submissions.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
