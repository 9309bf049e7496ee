//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Redis cache and the session store built on it
//! - The per-request persistence context (Unit of Work)

pub mod cache;
pub mod db;
pub mod repositories;
pub mod session;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{PostRepository, PostStore, StoreError, UserRepository, UserStore};
pub use session::{RedisSessionStore, SessionData, SessionStore};
pub use unit_of_work::{Persistence, UnitOfWork};
