//! Service layer for registration, authentication, and account management.

use crate::assignment::ports::{TaskRepository, TaskRepositoryError};
use crate::identity::{
    domain::{
        EmailAddress, IdentityDomainError, OAuthIdentity, OAuthProfile, OAuthTokens, User,
        UserDraft, UserId, UserRole, Username,
    },
    ports::{PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError},
};
use crate::submission::ports::AnswerRepository;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for a password-based registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLocalRequest {
    username: String,
    email: Option<String>,
    password: String,
}

impl RegisterLocalRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
            password: password.into(),
        }
    }

    /// Sets the optional email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// A unique identity field (username, email, or OAuth binding) is taken.
    #[error("identity already registered: {0}")]
    DuplicateIdentity(String),

    /// The username or password did not match a usable local credential.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The account has been deactivated.
    #[error("account is deactivated")]
    AccountInactive,

    /// The caller's role does not permit the operation.
    #[error("caller lacks permission for this operation")]
    Forbidden,

    /// The target user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// The user cannot be removed while tasks reference them as checker.
    #[error("user {0} is still assigned as task checker")]
    ReferentialConflict(UserId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// Password hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordHashError),

    /// User repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),

    /// Task repository operation failed during checker reference checks.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Answer repository operation failed during cascade removal.
    #[error(transparent)]
    Answers(#[from] crate::submission::ports::AnswerRepositoryError),
}

impl From<UserRepositoryError> for IdentityServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateUsername(username) => Self::DuplicateIdentity(username),
            UserRepositoryError::DuplicateEmail(email) => Self::DuplicateIdentity(email),
            UserRepositoryError::DuplicateOAuthIdentity {
                provider,
                external_id,
            } => Self::DuplicateIdentity(format!("{provider}/{external_id}")),
            UserRepositoryError::NotFound(id) => Self::UnknownUser(id),
            UserRepositoryError::StillReferenced(id) => Self::ReferentialConflict(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Identity orchestration service.
///
/// Owns registration, credential verification, OAuth linking, and the
/// role-gated account management operations. The task and answer
/// repositories participate only in hard removal, where checker references
/// block deletion and the target's answers cascade.
#[derive(Clone)]
pub struct IdentityService<R, T, A, H, C>
where
    R: UserRepository,
    T: TaskRepository,
    A: AnswerRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    tasks: Arc<T>,
    answers: Arc<A>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, T, A, H, C> IdentityService<R, T, A, H, C>
where
    R: UserRepository,
    T: TaskRepository,
    A: AnswerRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service.
    #[must_use]
    pub const fn new(
        users: Arc<R>,
        tasks: Arc<T>,
        answers: Arc<A>,
        hasher: Arc<H>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            users,
            tasks,
            answers,
            hasher,
            clock,
        }
    }

    /// Registers a password-based account with the default STUDENT role.
    ///
    /// The raw password is hashed immediately and never stored.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::DuplicateIdentity`] when the username
    /// or email is already taken, or a validation error for malformed input.
    pub async fn register_local(
        &self,
        request: RegisterLocalRequest,
    ) -> IdentityServiceResult<User> {
        let username = Username::new(request.username)?;
        let email = request.email.map(EmailAddress::new).transpose()?;
        let password_hash = self.hasher.hash(&request.password)?;
        let draft = UserDraft::local(username, email, password_hash, &*self.clock);
        Ok(self.users.create(draft).await?)
    }

    /// Verifies local credentials and records the login.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::InvalidCredentials`] on an unknown
    /// username, a password mismatch, or an account without local
    /// credentials, and [`IdentityServiceError::AccountInactive`] for
    /// deactivated accounts.
    pub async fn authenticate_local(
        &self,
        username: &str,
        password: &str,
    ) -> IdentityServiceResult<User> {
        let Some(mut user) = self.users.find_by_username(username).await? else {
            return Err(IdentityServiceError::InvalidCredentials);
        };
        let Some(stored_hash) = user.password_hash().map(ToOwned::to_owned) else {
            return Err(IdentityServiceError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &stored_hash)? {
            return Err(IdentityServiceError::InvalidCredentials);
        }
        if !user.is_active() {
            return Err(IdentityServiceError::AccountInactive);
        }

        user.record_login(&*self.clock);
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Resolves an external identity to its user, creating one on first
    /// login.
    ///
    /// The lookup-then-create step is atomic with respect to concurrent
    /// callers: the unique `(provider, external_id)` constraint makes the
    /// losing creator fail, after which it re-resolves the winner's record.
    /// Repeat logins refresh tokens and provider-asserted profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::DuplicateIdentity`] when the
    /// provider-suggested username or email collides with an unrelated
    /// account, or a repository error on persistence failure.
    pub async fn resolve_or_create_oauth(
        &self,
        identity: &OAuthIdentity,
        profile: OAuthProfile,
        tokens: OAuthTokens,
    ) -> IdentityServiceResult<User> {
        if let Some(user) = self.users.find_by_oauth(identity).await? {
            return self.refresh_oauth_login(user, &profile, tokens).await;
        }

        let draft = UserDraft::oauth(identity, profile.clone(), tokens.clone(), &*self.clock);
        match self.users.create(draft).await {
            Ok(user) => Ok(user),
            Err(UserRepositoryError::DuplicateOAuthIdentity { .. }) => {
                // Lost the creation race; the winner's record is authoritative.
                let user = self
                    .users
                    .find_by_oauth(identity)
                    .await?
                    .ok_or(IdentityServiceError::InvalidCredentials)?;
                self.refresh_oauth_login(user, &profile, tokens).await
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn refresh_oauth_login(
        &self,
        mut user: User,
        profile: &OAuthProfile,
        tokens: OAuthTokens,
    ) -> IdentityServiceResult<User> {
        user.refresh_oauth(profile, tokens, &*self.clock);
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Replaces a user's role. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-admin callers and
    /// [`IdentityServiceError::UnknownUser`] when the target does not exist.
    pub async fn set_role(
        &self,
        actor: &User,
        target: UserId,
        new_role: UserRole,
    ) -> IdentityServiceResult<User> {
        if !actor.role().is_admin() {
            return Err(IdentityServiceError::Forbidden);
        }
        let mut user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or(IdentityServiceError::UnknownUser(target))?;
        user.set_role(new_role, &*self.clock);
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Replaces a local password after verifying the old one.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::InvalidCredentials`] when the account
    /// has no local credentials or the old password does not match.
    pub async fn change_password(
        &self,
        user_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> IdentityServiceResult<User> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UnknownUser(user_id))?;
        let Some(stored_hash) = user.password_hash().map(ToOwned::to_owned) else {
            return Err(IdentityServiceError::InvalidCredentials);
        };
        if !self.hasher.verify(old_password, &stored_hash)? {
            return Err(IdentityServiceError::InvalidCredentials);
        }

        let new_hash = self.hasher.hash(new_password)?;
        user.set_password_hash(new_hash, &*self.clock);
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Soft-deletes an account. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Forbidden`] for non-admin callers and
    /// [`IdentityServiceError::UnknownUser`] when the target does not exist.
    pub async fn deactivate_user(&self, actor: &User, target: UserId) -> IdentityServiceResult<User> {
        if !actor.role().is_admin() {
            return Err(IdentityServiceError::Forbidden);
        }
        let mut user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or(IdentityServiceError::UnknownUser(target))?;
        user.deactivate(&*self.clock);
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Hard-removes an account, cascading the target's answers.
    /// Administrators only.
    ///
    /// The user row is deleted before the answer cascade: the store's
    /// checker reference check rides on that single delete, so a removal
    /// blocked by a checker reference leaves the target's answers intact.
    /// The explicit answer cascade afterwards mirrors the schema-level
    /// `ON DELETE CASCADE` for stores without one.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::ReferentialConflict`] while any task
    /// still names the target as checker; the caller must reassign or delete
    /// those tasks first.
    pub async fn remove_user(&self, actor: &User, target: UserId) -> IdentityServiceResult<()> {
        if !actor.role().is_admin() {
            return Err(IdentityServiceError::Forbidden);
        }
        if self.tasks.count_by_checker(target).await? > 0 {
            return Err(IdentityServiceError::ReferentialConflict(target));
        }
        self.users.delete(target).await?;
        self.answers.delete_by_student(target).await?;
        Ok(())
    }

    /// Idempotently seeds the administrator account.
    ///
    /// Run once at initialisation; an already seeded admin (or a lost
    /// concurrent seeding race) resolves to the existing record. An existing
    /// user holding the bootstrap username with any other role is a
    /// collision, never a successful seed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::DuplicateIdentity`] when the username
    /// belongs to a non-admin account, a validation error for malformed
    /// input, or a repository error on persistence failure.
    pub async fn bootstrap_admin(
        &self,
        request: RegisterLocalRequest,
    ) -> IdentityServiceResult<User> {
        if let Some(existing) = self.users.find_by_username(&request.username).await? {
            return Self::seeded_admin(existing);
        }

        let username = Username::new(request.username.clone())?;
        let email = request
            .email
            .clone()
            .map(EmailAddress::new)
            .transpose()?;
        let password_hash = self.hasher.hash(&request.password)?;
        let draft = UserDraft::local(username, email, password_hash, &*self.clock)
            .with_role(UserRole::Admin)
            .verified();
        match self.users.create(draft).await {
            Ok(user) => Ok(user),
            Err(UserRepositoryError::DuplicateUsername(_)) => {
                let user = self
                    .users
                    .find_by_username(&request.username)
                    .await?
                    .ok_or(IdentityServiceError::InvalidCredentials)?;
                Self::seeded_admin(user)
            }
            Err(other) => Err(other.into()),
        }
    }

    fn seeded_admin(user: User) -> IdentityServiceResult<User> {
        if user.role().is_admin() {
            Ok(user)
        } else {
            Err(IdentityServiceError::DuplicateIdentity(
                user.username().to_string(),
            ))
        }
    }

    /// Looks up a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Repository`] on persistence failure.
    pub async fn find_user(&self, id: UserId) -> IdentityServiceResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }
}
