//! Session persistence.
//!
//! A session maps a random id (held by the client in a cookie) to the
//! signed-in user. Sessions live in Redis and expire after the configured TTL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::Cache;
use crate::errors::AppResult;

/// Data stored per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// Session store trait for dependency injection.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session; `None` when unknown or expired
    async fn load(&self, session_id: &str) -> AppResult<Option<SessionData>>;

    /// Create or overwrite a session
    async fn save(&self, session_id: &str, data: &SessionData) -> AppResult<()>;

    /// Remove a session
    async fn destroy(&self, session_id: &str) -> AppResult<()>;
}

/// Session store backed by the Redis cache
pub struct RedisSessionStore {
    cache: Arc<Cache>,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(cache: Arc<Cache>, ttl_seconds: u64) -> Self {
        Self { cache, ttl_seconds }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> AppResult<Option<SessionData>> {
        self.cache.get_session(session_id).await
    }

    async fn save(&self, session_id: &str, data: &SessionData) -> AppResult<()> {
        self.cache
            .set_session(session_id, data, self.ttl_seconds)
            .await
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        self.cache.delete_session(session_id).await
    }
}
