//! Port contracts for identity management.
//!
//! Ports define infrastructure-agnostic interfaces used by identity
//! services.

pub mod password;
pub mod repository;

pub use password::{PasswordHashError, PasswordHashResult, PasswordHasher};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
