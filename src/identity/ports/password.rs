//! Password hashing port for local credentials.

use thiserror::Error;

/// Result type for password hashing operations.
pub type PasswordHashResult<T> = Result<T, PasswordHashError>;

/// Contract for salting, hashing, and verifying local passwords.
///
/// Implementations receive the raw password only transiently; the domain
/// stores nothing but the encoded hash string.
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted, self-describing hash string for the password.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the underlying algorithm fails.
    fn hash(&self, password: &str) -> PasswordHashResult<String>;

    /// Checks a password against a stored hash string.
    ///
    /// Returns `Ok(false)` on a clean mismatch; errors are reserved for
    /// malformed hashes and algorithm failures.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError`] when the stored hash cannot be parsed
    /// or the algorithm fails.
    fn verify(&self, password: &str, hash: &str) -> PasswordHashResult<bool>;
}

/// Error returned by password hashing implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);
