//! `PostgreSQL` repository implementation for user persistence.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
};
use crate::identity::{
    domain::{
        EmailAddress, OAuthIdentity, OAuthProvider, OAuthTokens, User, UserDraft, UserId, UserRole,
        Username,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type IdentityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: IdentityPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, draft: UserDraft) -> UserRepositoryResult<User> {
        let identity = UniqueIdentity::from_draft(&draft);
        let new_row = to_new_row(&draft);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| translate_unique_violation(err, &identity))?;
            row_to_user(row)
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let identity = UniqueIdentity::from_user(user);
        let changeset = to_changeset(user);
        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| translate_unique_violation(err, &identity))?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>> {
        let lookup = username.to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>> {
        let lookup = email.to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_oauth(&self, identity: &OAuthIdentity) -> UserRepositoryResult<Option<User>> {
        let provider = identity.provider().as_str().to_owned();
        let external_id = identity.external_id().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::oauth_provider.eq(provider))
                .filter(users::oauth_id.eq(external_id))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        UserRepositoryError::StillReferenced(id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            if deleted == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Unique column values carried into error translation.
struct UniqueIdentity {
    username: String,
    email: Option<String>,
    provider: OAuthProvider,
    oauth_id: Option<String>,
}

impl UniqueIdentity {
    fn from_draft(draft: &UserDraft) -> Self {
        Self {
            username: draft.username.to_string(),
            email: draft.email.as_ref().map(ToString::to_string),
            provider: draft.provider,
            oauth_id: draft.oauth_id.clone(),
        }
    }

    fn from_user(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            email: user.email().map(ToString::to_string),
            provider: user.provider(),
            oauth_id: user.oauth_id().map(ToOwned::to_owned),
        }
    }
}

/// Maps a unique-constraint violation onto the duplicate error matching the
/// colliding column set.
fn translate_unique_violation(err: DieselError, identity: &UniqueIdentity) -> UserRepositoryError {
    let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) = err else {
        return UserRepositoryError::persistence(err);
    };
    match info.constraint_name() {
        Some("users_email_key") => {
            UserRepositoryError::DuplicateEmail(identity.email.clone().unwrap_or_default())
        }
        Some("unique_oauth_provider_id") => UserRepositoryError::DuplicateOAuthIdentity {
            provider: identity.provider,
            external_id: identity.oauth_id.clone().unwrap_or_default(),
        },
        _ => UserRepositoryError::DuplicateUsername(identity.username.clone()),
    }
}

fn to_new_row(draft: &UserDraft) -> NewUserRow {
    NewUserRow {
        username: draft.username.to_string(),
        email: draft.email.as_ref().map(ToString::to_string),
        hashed_password: draft.password_hash.clone(),
        role: draft.role.as_str().to_owned(),
        oauth_provider: draft.provider.as_str().to_owned(),
        oauth_id: draft.oauth_id.clone(),
        oauth_access_token: draft.tokens.access_token.clone(),
        oauth_refresh_token: draft.tokens.refresh_token.clone(),
        oauth_token_expires_at: draft.tokens.expires_at,
        is_active: draft.is_active,
        is_verified: draft.is_verified,
        is_email_verified: draft.is_email_verified,
        created_at: draft.created_at,
        updated_at: draft.updated_at,
        last_login_at: draft.last_login_at,
    }
}

fn to_changeset(user: &User) -> UserChangeset {
    UserChangeset {
        username: user.username().to_string(),
        email: user.email().map(ToString::to_string),
        hashed_password: user.password_hash().map(ToOwned::to_owned),
        role: user.role().as_str().to_owned(),
        oauth_provider: user.provider().as_str().to_owned(),
        oauth_id: user.oauth_id().map(ToOwned::to_owned),
        oauth_access_token: user.tokens().access_token.clone(),
        oauth_refresh_token: user.tokens().refresh_token.clone(),
        oauth_token_expires_at: user.tokens().expires_at,
        is_active: user.is_active(),
        is_verified: user.is_verified(),
        is_email_verified: user.is_email_verified(),
        updated_at: user.updated_at(),
        last_login_at: user.last_login_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let role = UserRole::try_from(row.role.as_str()).map_err(UserRepositoryError::persistence)?;
    let provider = OAuthProvider::try_from(row.oauth_provider.as_str())
        .map_err(UserRepositoryError::persistence)?;
    let username = Username::new(row.username).map_err(UserRepositoryError::persistence)?;
    let email = row
        .email
        .map(EmailAddress::new)
        .transpose()
        .map_err(UserRepositoryError::persistence)?;

    let draft = UserDraft {
        username,
        email,
        password_hash: row.hashed_password,
        role,
        provider,
        oauth_id: row.oauth_id,
        tokens: OAuthTokens {
            access_token: row.oauth_access_token,
            refresh_token: row.oauth_refresh_token,
            expires_at: row.oauth_token_expires_at,
        },
        is_active: row.is_active,
        is_verified: row.is_verified,
        is_email_verified: row.is_email_verified,
        created_at: row.created_at,
        updated_at: row.updated_at,
        last_login_at: row.last_login_at,
    };
    Ok(User::from_draft(UserId::new(row.id), draft))
}
