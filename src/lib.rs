//! postit - GraphQL account and post server
//!
//! Users register and log in through GraphQL mutations; credentials are
//! checked by a resolver that reports failures per input field. A session
//! cookie backed by Redis keeps the user signed in across requests.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, posts, credential rules, password hashing
//! - **services**: Credential resolver and post use cases
//! - **infra**: Database, repositories, Redis cache and sessions
//! - **api**: GraphQL schema, HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{build_schema, AppSchema, AppState};
pub use config::Config;
pub use domain::{FieldError, Post, User, UserResponse};
pub use errors::{AppError, AppResult};
