//! API layer - HTTP handlers, GraphQL schema and session glue
//!
//! - GraphQL schema and resolvers
//! - Request handlers
//! - Cookie-backed sessions
//! - Route definitions

pub mod graphql;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;

pub use graphql::{build_schema, AppSchema};
pub use routes::create_router;
pub use session::RequestSession;
pub use state::AppState;
