//! User domain entity.

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User domain entity.
///
/// Exposed over GraphQL as `User`; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    #[graphql(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user stamped with the current time
    pub fn new(id: Uuid, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
