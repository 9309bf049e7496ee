//! Authentication service - the credential resolver behind `register`,
//! `login` and `me`.
//!
//! Field-level failures (short input, taken username, unknown user, wrong
//! password) come back as `Ok(UserResponse)` carrying a `FieldError`. Only
//! unexpected store or hashing failures are `Err`.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    FIELD_PASSWORD, FIELD_USERNAME, MSG_INCORRECT_PASSWORD, MSG_UNKNOWN_USERNAME,
    MSG_USERNAME_TAKEN,
};
use crate::domain::password::DUMMY_HASH;
use crate::domain::{Credentials, PasswordHashing, User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{StoreError, UnitOfWork};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate input, hash the password and create the user
    async fn register(&self, username: String, password: String) -> AppResult<UserResponse>;

    /// Check a username/password pair against the stored hash
    async fn login(&self, username: String, password: String) -> AppResult<UserResponse>;

    /// Resolve the user behind a session
    async fn current_user(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    hasher: Arc<dyn PasswordHashing>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self { uow, hasher }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, username: String, password: String) -> AppResult<UserResponse> {
        let credentials = Credentials::new(username, password);
        if let Some(error) = credentials.registration_error() {
            tracing::debug!(field = %error.field, "Registration rejected by validation");
            return Ok(error.into());
        }

        let password_hash = self.hasher.hash(&credentials.password).await?;

        match self
            .uow
            .users()
            .create(credentials.username, password_hash)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                Ok(UserResponse::success(user))
            }
            Err(StoreError::UniqueViolation(_)) => {
                Ok(UserResponse::failure(FIELD_USERNAME, MSG_USERNAME_TAKEN))
            }
            Err(StoreError::Database(e)) => {
                tracing::error!(error = %e, "Failed to persist new user");
                Err(AppError::Database(e))
            }
        }
    }

    async fn login(&self, username: String, password: String) -> AppResult<UserResponse> {
        let Some(user) = self.uow.users().find_by_username(&username).await? else {
            // Same hashing cost as a wrong password
            let _ = self.hasher.verify(&password, DUMMY_HASH).await;
            return Ok(UserResponse::failure(FIELD_USERNAME, MSG_UNKNOWN_USERNAME));
        };

        if !self.hasher.verify(&password, &user.password_hash).await {
            tracing::debug!(user_id = %user.id, "Login rejected: incorrect password");
            return Ok(UserResponse::failure(FIELD_PASSWORD, MSG_INCORRECT_PASSWORD));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(UserResponse::success(user))
    }

    async fn current_user(&self, id: Uuid) -> AppResult<Option<User>> {
        self.uow.users().find_by_id(id).await
    }
}
