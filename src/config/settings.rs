//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_TTL_SECONDS, ENV_PRODUCTION,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub session_cookie_name: String,
    pub session_ttl_seconds: u64,
    pub cors_origin: String,
    pub production: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("cors_origin", &self.cors_origin)
            .field("production", &self.production)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            production: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset or
    /// unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            session_cookie_name: lookup("SESSION_COOKIE_NAME")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.session_cookie_name),
            session_ttl_seconds: lookup("SESSION_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.session_ttl_seconds),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            production: lookup("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case(ENV_PRODUCTION))
                .unwrap_or(defaults.production),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
