//! Unit of Work pattern implementation.
//!
//! A `Persistence` is the per-request persistence context: the GraphQL
//! handler builds one from the shared connection pool for every inbound
//! request and drops it with the request. Nothing is cached across requests.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{PostRepository, PostStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get post repository
    fn posts(&self) -> Arc<dyn PostRepository>;
}

/// Concrete implementation of UnitOfWork over a SeaORM connection
pub struct Persistence {
    user_repo: Arc<UserStore>,
    post_repo: Arc<PostStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            post_repo: Arc::new(PostStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.post_repo.clone()
    }
}
