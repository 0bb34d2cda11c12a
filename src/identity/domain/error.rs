//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty, too long, or contains whitespace.
    #[error("invalid username: '{0}'")]
    InvalidUsername(String),

    /// The email address does not have a plausible `local@domain` shape.
    #[error("invalid email address: '{0}'")]
    InvalidEmail(String),

    /// LOCAL accounts are not bound to an external identity.
    #[error("LOCAL is not an external OAuth provider")]
    LocalProviderBinding,

    /// The provider-assigned external id is empty after trimming.
    #[error("external OAuth id must not be empty")]
    EmptyExternalId,
}

/// Error returned while parsing user roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing OAuth providers from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown OAuth provider: {0}")]
pub struct ParseProviderError(pub String);
