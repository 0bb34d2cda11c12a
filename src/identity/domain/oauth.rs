//! OAuth provider tags, identity bindings, and token material.

use super::{EmailAddress, IdentityDomainError, ParseProviderError, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity provider a user record is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthProvider {
    /// Password-based account managed by the platform itself.
    Local,
    /// Google OAuth account.
    Google,
    /// GitHub OAuth account.
    Github,
    /// Microsoft OAuth account.
    Microsoft,
}

impl OAuthProvider {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Google => "google",
            Self::Github => "github",
            Self::Microsoft => "microsoft",
        }
    }

    /// Returns `true` for the password-based provider tag.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl TryFrom<&str> for OAuthProvider {
    type Error = ParseProviderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "local" => Ok(Self::Local),
            "google" => Ok(Self::Google),
            "github" => Ok(Self::Github),
            "microsoft" => Ok(Self::Microsoft),
            _ => Err(ParseProviderError(value.to_owned())),
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding between a user record and a provider-assigned external identity.
///
/// At most one user may hold a given `(provider, external_id)` pair; the
/// store enforces this with a unique constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OAuthIdentity {
    provider: OAuthProvider,
    external_id: String,
}

impl OAuthIdentity {
    /// Creates a validated external identity binding.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::LocalProviderBinding`] for the LOCAL
    /// provider tag and [`IdentityDomainError::EmptyExternalId`] when the
    /// external id is empty after trimming.
    pub fn new(
        provider: OAuthProvider,
        external_id: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        if provider.is_local() {
            return Err(IdentityDomainError::LocalProviderBinding);
        }
        let external_id = external_id.into();
        let normalized = external_id.trim();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyExternalId);
        }
        Ok(Self {
            provider,
            external_id: normalized.to_owned(),
        })
    }

    /// Returns the provider tag.
    #[must_use]
    pub const fn provider(&self) -> OAuthProvider {
        self.provider
    }

    /// Returns the provider-assigned external id.
    #[must_use]
    pub fn external_id(&self) -> &str {
        &self.external_id
    }
}

impl fmt::Display for OAuthIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.external_id)
    }
}

/// Token material issued by an OAuth provider, refreshed on every login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthTokens {
    /// Short-lived access token, when the provider returned one.
    pub access_token: Option<String>,
    /// Long-lived refresh token, when the provider returned one.
    pub refresh_token: Option<String>,
    /// Access token expiry, when the provider returned one.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Profile fields asserted by an OAuth provider during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    /// Account name suggested by the provider.
    pub username: Username,
    /// Email address asserted by the provider, if any.
    pub email: Option<EmailAddress>,
    /// Whether the provider vouches for the email address.
    pub email_verified: bool,
}

impl OAuthProfile {
    /// Creates a profile with an unverified, absent email.
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self {
            username,
            email: None,
            email_verified: false,
        }
    }

    /// Sets the asserted email address.
    #[must_use]
    pub fn with_email(mut self, email: EmailAddress, verified: bool) -> Self {
        self.email = Some(email);
        self.email_verified = verified;
        self
    }
}
