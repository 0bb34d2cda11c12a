//! Diesel schema for user persistence.

diesel::table! {
    /// User accounts with mixed local and OAuth credentials.
    users (id) {
        /// Store-assigned user identifier.
        id -> Int8,
        /// Unique account name.
        #[max_length = 100]
        username -> Varchar,
        /// Optional unique email address.
        #[max_length = 255]
        email -> Nullable<Varchar>,
        /// Salted password hash for local credentials.
        #[max_length = 255]
        hashed_password -> Nullable<Varchar>,
        /// Access role.
        #[max_length = 20]
        role -> Varchar,
        /// Identity provider tag.
        #[max_length = 20]
        oauth_provider -> Varchar,
        /// Provider-assigned external id; unique together with the provider.
        #[max_length = 255]
        oauth_id -> Nullable<Varchar>,
        /// Provider access token.
        oauth_access_token -> Nullable<Text>,
        /// Provider refresh token.
        oauth_refresh_token -> Nullable<Text>,
        /// Access token expiry.
        oauth_token_expires_at -> Nullable<Timestamptz>,
        /// Soft-deletion flag.
        is_active -> Bool,
        /// Account verification flag.
        is_verified -> Bool,
        /// Email verification flag.
        is_email_verified -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
        /// Last successful login timestamp.
        last_login_at -> Nullable<Timestamptz>,
    }
}
