//! Redis access.
//!
//! Values are stored as JSON strings. Sessions live under the
//! `session:` prefix with an expiry set on every write.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, CACHE_PREFIX_SESSION};
use crate::errors::{AppError, AppResult};

/// Redis handle over a shared, auto-reconnecting connection manager.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");
        Ok(Self { connection })
    }

    /// Read and decode a JSON value; a value that no longer decodes is an
    /// internal error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(key).await.map_err(cache_error)?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| AppError::internal(format!("Undecodable cache value at {}: {}", key, e)))
        })
        .transpose()
    }

    /// Write a JSON value that expires after `ttl_seconds`.
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Unencodable cache value: {}", e)))?;

        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(key).await.map_err(cache_error)
    }

    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        conn.exists(key).await.map_err(cache_error)
    }

    pub async fn set_session<T: Serialize>(
        &self,
        session_id: &str,
        data: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        self.set_with_ttl(&session_key(session_id), data, ttl_seconds)
            .await
    }

    pub async fn get_session<T: DeserializeOwned>(&self, session_id: &str) -> AppResult<Option<T>> {
        self.get(&session_key(session_id)).await
    }

    pub async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        self.delete(&session_key(session_id)).await
    }
}

/// Redis key holding a session.
pub fn session_key(session_id: &str) -> String {
    format!("{}{}", CACHE_PREFIX_SESSION, session_id)
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::Cache(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_prefix() {
        assert_eq!(session_key("abc"), "session:abc");
    }
}
