//! Domain model for identity and authorisation.
//!
//! Covers user records with mixed local/OAuth credentials, the closed role
//! set that gates every mutating operation, and the credential invariants
//! (LOCAL accounts carry a password hash, external bindings are unique per
//! provider) while keeping all infrastructure concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod oauth;
mod role;
mod user;

pub use error::{IdentityDomainError, ParseProviderError, ParseRoleError};
pub use ids::{EmailAddress, UserId, Username};
pub use oauth::{OAuthIdentity, OAuthProfile, OAuthProvider, OAuthTokens};
pub use role::UserRole;
pub use user::{User, UserDraft};
