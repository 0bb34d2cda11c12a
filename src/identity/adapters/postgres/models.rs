//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Store-assigned user identifier.
    pub id: i64,
    /// Unique account name.
    pub username: String,
    /// Optional unique email address.
    pub email: Option<String>,
    /// Salted password hash for local credentials.
    pub hashed_password: Option<String>,
    /// Access role storage form.
    pub role: String,
    /// Identity provider storage form.
    pub oauth_provider: String,
    /// Provider-assigned external id.
    pub oauth_id: Option<String>,
    /// Provider access token.
    pub oauth_access_token: Option<String>,
    /// Provider refresh token.
    pub oauth_refresh_token: Option<String>,
    /// Access token expiry.
    pub oauth_token_expires_at: Option<DateTime<Utc>>,
    /// Soft-deletion flag.
    pub is_active: bool,
    /// Account verification flag.
    pub is_verified: bool,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Last successful login timestamp.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Insert model for user records; the id comes from the store sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Unique account name.
    pub username: String,
    /// Optional unique email address.
    pub email: Option<String>,
    /// Salted password hash for local credentials.
    pub hashed_password: Option<String>,
    /// Access role storage form.
    pub role: String,
    /// Identity provider storage form.
    pub oauth_provider: String,
    /// Provider-assigned external id.
    pub oauth_id: Option<String>,
    /// Provider access token.
    pub oauth_access_token: Option<String>,
    /// Provider refresh token.
    pub oauth_refresh_token: Option<String>,
    /// Access token expiry.
    pub oauth_token_expires_at: Option<DateTime<Utc>>,
    /// Soft-deletion flag.
    pub is_active: bool,
    /// Account verification flag.
    pub is_verified: bool,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Last successful login timestamp.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Full-row changeset applied on every user update.
///
/// `treat_none_as_null` keeps cleared optional fields cleared in storage
/// instead of silently skipping them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangeset {
    /// Unique account name.
    pub username: String,
    /// Optional unique email address.
    pub email: Option<String>,
    /// Salted password hash for local credentials.
    pub hashed_password: Option<String>,
    /// Access role storage form.
    pub role: String,
    /// Identity provider storage form.
    pub oauth_provider: String,
    /// Provider-assigned external id.
    pub oauth_id: Option<String>,
    /// Provider access token.
    pub oauth_access_token: Option<String>,
    /// Provider refresh token.
    pub oauth_refresh_token: Option<String>,
    /// Access token expiry.
    pub oauth_token_expires_at: Option<DateTime<Utc>>,
    /// Soft-deletion flag.
    pub is_active: bool,
    /// Account verification flag.
    pub is_verified: bool,
    /// Email verification flag.
    pub is_email_verified: bool,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Last successful login timestamp.
    pub last_login_at: Option<DateTime<Utc>>,
}
