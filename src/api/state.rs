//! Application state shared by every handler.

use std::sync::Arc;

use super::graphql::{build_schema, AppSchema};
use super::session::CookieSettings;
use crate::config::Config;
use crate::domain::{Argon2Hashing, PasswordHashing};
use crate::infra::{Cache, Database, RedisSessionStore, SessionStore};

/// Application state (DI container).
///
/// Request-scoped services are not stored here; the GraphQL handler builds
/// them from `database` for every request.
#[derive(Clone)]
pub struct AppState {
    /// Executable GraphQL schema
    pub schema: AppSchema,
    /// Database connection pool
    pub database: Arc<Database>,
    /// Redis cache, used directly by the health check
    pub cache: Arc<Cache>,
    /// Session persistence
    pub sessions: Arc<dyn SessionStore>,
    /// Password hasher handed to each request's services
    pub hasher: Arc<dyn PasswordHashing>,
    /// Session cookie attributes
    pub cookies: CookieSettings,
    /// Allowed browser origin for credentialed requests
    pub cors_origin: String,
    /// Serve GraphiQL on `GET /graphql`
    pub graphiql: bool,
}

impl AppState {
    /// Create application state from live connections and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: &Config) -> Self {
        let sessions = Arc::new(RedisSessionStore::new(
            cache.clone(),
            config.session_ttl_seconds,
        ));

        Self {
            schema: build_schema(),
            database,
            cache,
            sessions,
            hasher: Arc::new(Argon2Hashing),
            cookies: CookieSettings::from_config(config),
            cors_origin: config.cors_origin.clone(),
            graphiql: !config.production,
        }
    }
}
