use async_graphql::Object;

#[derive(Default)]
pub struct HelloQuery;

#[Object]
impl HelloQuery {
    /// Liveness probe for GraphQL clients
    async fn hello(&self) -> &'static str {
        "hello world"
    }
}
