//! In-memory user repository for identity tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{OAuthIdentity, OAuthProvider, User, UserDraft, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
///
/// Uniqueness checks and the insert happen under a single write guard, so
/// the check-then-insert races the relational schema resolves with unique
/// constraints behave identically here.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<String, UserId>,
    email_index: HashMap<String, UserId>,
    oauth_index: HashMap<(OAuthProvider, String), UserId>,
    next_id: i64,
}

impl Default for InMemoryUserState {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            username_index: HashMap::new(),
            email_index: HashMap::new(),
            oauth_index: HashMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_unique(state: &InMemoryUserState, user: &User) -> UserRepositoryResult<()> {
    if let Some(existing) = state.username_index.get(user.username().as_str())
        && *existing != user.id()
    {
        return Err(UserRepositoryError::DuplicateUsername(
            user.username().to_string(),
        ));
    }
    if let Some(email) = user.email()
        && let Some(existing) = state.email_index.get(email.as_str())
        && *existing != user.id()
    {
        return Err(UserRepositoryError::DuplicateEmail(email.to_string()));
    }
    if let Some(oauth_id) = user.oauth_id()
        && let Some(existing) = state
            .oauth_index
            .get(&(user.provider(), oauth_id.to_owned()))
        && *existing != user.id()
    {
        return Err(UserRepositoryError::DuplicateOAuthIdentity {
            provider: user.provider(),
            external_id: oauth_id.to_owned(),
        });
    }
    Ok(())
}

fn remove_from_indexes(state: &mut InMemoryUserState, user: &User) {
    state.username_index.remove(user.username().as_str());
    if let Some(email) = user.email() {
        state.email_index.remove(email.as_str());
    }
    if let Some(oauth_id) = user.oauth_id() {
        state
            .oauth_index
            .remove(&(user.provider(), oauth_id.to_owned()));
    }
}

fn insert_into_indexes(state: &mut InMemoryUserState, user: &User) {
    state
        .username_index
        .insert(user.username().to_string(), user.id());
    if let Some(email) = user.email() {
        state.email_index.insert(email.to_string(), user.id());
    }
    if let Some(oauth_id) = user.oauth_id() {
        state
            .oauth_index
            .insert((user.provider(), oauth_id.to_owned()), user.id());
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, draft: UserDraft) -> UserRepositoryResult<User> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let id = UserId::new(state.next_id);
        let user = User::from_draft(id, draft);
        check_unique(&state, &user)?;

        state.next_id += 1;
        insert_into_indexes(&mut state, &user);
        state.users.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let old_user = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .clone();
        check_unique(&state, user)?;

        remove_from_indexes(&mut state, &old_user);
        insert_into_indexes(&mut state, user);
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn find_by_oauth(&self, identity: &OAuthIdentity) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (identity.provider(), identity.external_id().to_owned());
        let user = state
            .oauth_index
            .get(&key)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let user = state
            .users
            .remove(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        remove_from_indexes(&mut state, &user);
        Ok(())
    }
}
