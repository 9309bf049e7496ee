//! GraphQL schema.
//!
//! Resolvers read two pieces of per-request data: the `Services` built for
//! the request and the caller's `RequestSession`.

mod hello;
mod post;
mod user;

use async_graphql::{Context, EmptySubscription, MergedObject, Schema};
use std::sync::Arc;

use crate::api::session::RequestSession;
use crate::services::Services;

pub use hello::HelloQuery;
pub use post::{PostMutation, PostQuery};
pub use user::{UserMutation, UserQuery};

/// Maximum selection depth accepted per operation
const MAX_QUERY_DEPTH: usize = 10;

#[derive(MergedObject, Default)]
pub struct QueryRoot(HelloQuery, UserQuery, PostQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(UserMutation, PostMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema. Request data is attached per request by the handler.
pub fn build_schema() -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .limit_depth(MAX_QUERY_DEPTH)
    .finish()
}

fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Services> {
    ctx.data::<Services>()
}

fn session<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<RequestSession>> {
    ctx.data::<Arc<RequestSession>>()
}
