//! Praktika: persistent domain model for an educational assignment platform.
//!
//! This crate provides the core functionality for managing user accounts,
//! staff-authored tasks, and student answers moving through a grading
//! workflow.
//!
//! # Architecture
//!
//! Praktika follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`identity`]: User accounts, credentials, and role-based authorization
//! - [`assignment`]: The staff-maintained task catalogue
//! - [`submission`]: Student answers and the grading lifecycle

pub mod assignment;
pub mod attachment;
pub mod identity;
pub mod submission;
