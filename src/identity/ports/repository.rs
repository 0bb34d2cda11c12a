//! Repository port for user persistence and identity lookup.

use crate::identity::domain::{OAuthIdentity, OAuthProvider, User, UserDraft, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
///
/// Uniqueness of `username`, `email`, and `(oauth_provider, oauth_id)` is
/// enforced inside the store: when two concurrent callers race past a
/// lookup, the second insert must fail with the matching duplicate error,
/// never overwrite.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateUsername`],
    /// [`UserRepositoryError::DuplicateEmail`], or
    /// [`UserRepositoryError::DuplicateOAuthIdentity`] when a uniqueness
    /// constraint rejects the insert.
    async fn create(&self, draft: UserDraft) -> UserRepositoryResult<User>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist, or a duplicate error when a changed unique field collides.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by exact username. Returns `None` when absent.
    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by exact email address. Returns `None` when absent.
    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>>;

    /// Finds the user bound to an external identity. Returns `None` when
    /// absent.
    async fn find_by_oauth(&self, identity: &OAuthIdentity) -> UserRepositoryResult<Option<User>>;

    /// Physically removes a user record.
    ///
    /// Dependent answers cascade at the schema level; callers orchestrate the
    /// same cascade explicitly so every adapter behaves alike.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist, or [`UserRepositoryError::StillReferenced`] when the schema
    /// blocks deletion because a task still names the user as checker.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// The username is already taken.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The external identity is already bound to another user.
    #[error("OAuth identity already bound: {provider}/{external_id}")]
    DuplicateOAuthIdentity {
        /// Provider tag of the colliding binding.
        provider: OAuthProvider,
        /// External id of the colliding binding.
        external_id: String,
    },

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// A task still references the user as checker.
    #[error("user {0} is still referenced as a task checker")]
    StillReferenced(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
