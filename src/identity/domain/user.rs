//! User aggregate root and its unsaved draft form.

use super::{EmailAddress, OAuthIdentity, OAuthProfile, OAuthProvider, OAuthTokens, UserId,
            UserRole, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User aggregate root.
///
/// Identity records are never physically deleted in normal operation;
/// offboarding flips `is_active` instead. The `updated_at` field follows the
/// touch-on-mutation convention: every mutator refreshes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: Option<EmailAddress>,
    password_hash: Option<String>,
    role: UserRole,
    provider: OAuthProvider,
    oauth_id: Option<String>,
    tokens: OAuthTokens,
    is_active: bool,
    is_verified: bool,
    is_email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

/// Unsaved user record awaiting a store-assigned identifier.
///
/// Constructed through [`UserDraft::local`] or [`UserDraft::oauth`], which
/// uphold the credential invariants: LOCAL drafts always carry a password
/// hash, OAuth drafts always carry an external identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    /// Account name.
    pub username: Username,
    /// Optional unique email address.
    pub email: Option<EmailAddress>,
    /// Salted password hash for local credentials.
    pub password_hash: Option<String>,
    /// Access role, defaults to [`UserRole::Student`].
    pub role: UserRole,
    /// Identity provider tag.
    pub provider: OAuthProvider,
    /// Provider-assigned external id for non-LOCAL accounts.
    pub oauth_id: Option<String>,
    /// Provider token material.
    pub tokens: OAuthTokens,
    /// Soft-deletion flag, `true` on creation.
    pub is_active: bool,
    /// Account verification flag.
    pub is_verified: bool,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Latest successful login timestamp.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl UserDraft {
    /// Creates a draft for a password-based registration.
    ///
    /// The caller supplies an already salted and hashed password, never the
    /// raw secret. New registrations default to [`UserRole::Student`].
    #[must_use]
    pub fn local(
        username: Username,
        email: Option<EmailAddress>,
        password_hash: String,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            username,
            email,
            password_hash: Some(password_hash),
            role: UserRole::Student,
            provider: OAuthProvider::Local,
            oauth_id: None,
            tokens: OAuthTokens::default(),
            is_active: true,
            is_verified: false,
            is_email_verified: false,
            created_at: timestamp,
            updated_at: timestamp,
            last_login_at: None,
        }
    }

    /// Creates a draft for a first OAuth login.
    ///
    /// Verification flags derive from the provider's assertion: the account
    /// is considered verified because the provider authenticated it, and the
    /// email inherits the provider's verification claim.
    #[must_use]
    pub fn oauth(
        identity: &OAuthIdentity,
        profile: OAuthProfile,
        tokens: OAuthTokens,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            username: profile.username,
            email: profile.email,
            password_hash: None,
            role: UserRole::Student,
            provider: identity.provider(),
            oauth_id: Some(identity.external_id().to_owned()),
            tokens,
            is_active: true,
            is_verified: true,
            is_email_verified: profile.email_verified,
            created_at: timestamp,
            updated_at: timestamp,
            last_login_at: Some(timestamp),
        }
    }

    /// Overrides the draft role.
    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Marks the draft account as verified.
    #[must_use]
    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }
}

impl User {
    /// Materialises a persisted user from its draft and store-assigned id.
    #[must_use]
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            username: draft.username,
            email: draft.email,
            password_hash: draft.password_hash,
            role: draft.role,
            provider: draft.provider,
            oauth_id: draft.oauth_id,
            tokens: draft.tokens,
            is_active: draft.is_active,
            is_verified: draft.is_verified,
            is_email_verified: draft.is_email_verified,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
            last_login_at: draft.last_login_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address, if one is registered.
    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the stored password hash, if local credentials exist.
    #[must_use]
    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    /// Returns the access role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the identity provider tag.
    #[must_use]
    pub const fn provider(&self) -> OAuthProvider {
        self.provider
    }

    /// Returns the provider-assigned external id, if bound.
    #[must_use]
    pub fn oauth_id(&self) -> Option<&str> {
        self.oauth_id.as_deref()
    }

    /// Returns the stored provider token material.
    #[must_use]
    pub const fn tokens(&self) -> &OAuthTokens {
        &self.tokens
    }

    /// Returns `false` once the account has been deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the account verification flag.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Returns the email verification flag.
    #[must_use]
    pub const fn is_email_verified(&self) -> bool {
        self.is_email_verified
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the latest successful login timestamp.
    #[must_use]
    pub const fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Returns `true` when the account can authenticate with a password.
    #[must_use]
    pub const fn has_local_credentials(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Records a successful login.
    pub fn record_login(&mut self, clock: &impl Clock) {
        self.last_login_at = Some(clock.utc());
        self.touch(clock);
    }

    /// Replaces the access role.
    pub fn set_role(&mut self, role: UserRole, clock: &impl Clock) {
        self.role = role;
        self.touch(clock);
    }

    /// Soft-deletes the account.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.is_active = false;
        self.touch(clock);
    }

    /// Replaces the stored password hash.
    pub fn set_password_hash(&mut self, password_hash: String, clock: &impl Clock) {
        self.password_hash = Some(password_hash);
        self.touch(clock);
    }

    /// Refreshes provider tokens and profile assertions on a repeat OAuth
    /// login.
    ///
    /// An already registered email is never overwritten; the unique email
    /// constraint belongs to whoever claimed it first.
    pub fn refresh_oauth(&mut self, profile: &OAuthProfile, tokens: OAuthTokens, clock: &impl Clock) {
        self.tokens = tokens;
        if self.email.is_none()
            && let Some(email) = profile.email.clone()
        {
            self.email = Some(email);
            self.is_email_verified = profile.email_verified;
        }
        self.last_login_at = Some(clock.utc());
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
