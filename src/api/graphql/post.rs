use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::services;
use crate::domain::Post;
use crate::services::{PostService, ServiceContainer};

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        services(ctx)?.posts().posts().await.map_err(|e| e.extend())
    }

    async fn post(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Post>> {
        services(ctx)?.posts().post(id).await.map_err(|e| e.extend())
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, title: String) -> Result<Post> {
        services(ctx)?
            .posts()
            .create_post(title)
            .await
            .map_err(|e| e.extend())
    }

    /// Null when no post has the given id
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: Option<String>,
    ) -> Result<Option<Post>> {
        services(ctx)?
            .posts()
            .update_post(id, title)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        services(ctx)?
            .posts()
            .delete_post(id)
            .await
            .map_err(|e| e.extend())
    }
}
