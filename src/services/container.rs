//! Service Container - Centralized service access.
//!
//! A container is assembled per request around a fresh persistence
//! context, so no service outlives the request that created it.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::{AuthService, Authenticator, PostManager, PostService};
use crate::domain::PasswordHashing;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get post service
    fn posts(&self) -> Arc<dyn PostService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    post_service: Arc<dyn PostService>,
}

impl Services {
    /// Create a new service container from already built services
    pub fn new(auth_service: Arc<dyn AuthService>, post_service: Arc<dyn PostService>) -> Self {
        Self {
            auth_service,
            post_service,
        }
    }

    /// Create a service container over a new persistence context
    pub fn from_connection(db: DatabaseConnection, hasher: Arc<dyn PasswordHashing>) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), hasher));
        let post_service = Arc::new(PostManager::new(uow));

        Self {
            auth_service,
            post_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }
}
