//! Argon2 implementation of the password hashing port.

use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Argon2, PasswordHasher as _};

use crate::identity::ports::{PasswordHashError, PasswordHashResult, PasswordHasher};

/// Password hasher producing salted Argon2id PHC strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Creates a hasher with the default Argon2id parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> PasswordHashResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashError(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> PasswordHashResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|err| PasswordHashError(err.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(err) => Err(PasswordHashError(err.to_string())),
        }
    }
}
