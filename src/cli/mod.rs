//! CLI module - Command-line interface for the application.
//!
//! - `serve` - Start the GraphQL server
//! - `migrate` - Database migrations

pub mod args;

pub use args::{Cli, Commands};
