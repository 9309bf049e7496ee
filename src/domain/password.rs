//! Password value object and the hashing collaborator used by the
//! credential resolver.
//!
//! Argon2id with default parameters stands in for a bcrypt cost of 10.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

/// Well-formed Argon2id hash that matches no password. Verified against when
/// a login names an unknown user, so both failure paths do the same work.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text with a fresh salt.
    ///
    /// Length rules are enforced by `Credentials`, not here.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    /// A malformed stored hash verifies as false.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or_else(|e| {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        })
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// One-way password hashing collaborator.
#[async_trait]
pub trait PasswordHashing: Send + Sync {
    /// Hash a plain text password with a fresh salt
    async fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Check a plain text password against a stored hash
    async fn verify(&self, plain_text: &str, hash: &str) -> bool;
}

/// Argon2 hasher that runs on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hashing;

#[async_trait]
impl PasswordHashing for Argon2Hashing {
    async fn hash(&self, plain_text: &str) -> AppResult<String> {
        let plain = plain_text.to_owned();
        tokio::task::spawn_blocking(move || Password::new(&plain).map(Password::into_string))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify(&self, plain_text: &str, hash: &str) -> bool {
        let plain = plain_text.to_owned();
        let stored = Password::from_hash(hash.to_owned());
        match tokio::task::spawn_blocking(move || stored.verify(&plain)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Verification task failed: {}", e);
                false
            }
        }
    }
}
