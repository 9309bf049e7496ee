//! Post service - Handles post-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Post;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// List all posts
    async fn posts(&self) -> AppResult<Vec<Post>>;

    /// Get a post by ID
    async fn post(&self, id: i32) -> AppResult<Option<Post>>;

    /// Create a post
    async fn create_post(&self, title: String) -> AppResult<Post>;

    /// Update a post's title when one is given; `None` if the post is missing
    async fn update_post(&self, id: i32, title: Option<String>) -> AppResult<Option<Post>>;

    /// Delete a post. Deleting a missing post still succeeds.
    async fn delete_post(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of PostService using Unit of Work.
pub struct PostManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PostManager<U> {
    /// Create new post service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl<U: UnitOfWork> PostService for PostManager<U> {
    async fn posts(&self) -> AppResult<Vec<Post>> {
        self.uow.posts().list().await
    }

    async fn post(&self, id: i32) -> AppResult<Option<Post>> {
        self.uow.posts().find_by_id(id).await
    }

    async fn create_post(&self, title: String) -> AppResult<Post> {
        validate_title(&title)?;
        let post = self.uow.posts().create(title).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    async fn update_post(&self, id: i32, title: Option<String>) -> AppResult<Option<Post>> {
        match title {
            Some(title) => {
                validate_title(&title)?;
                self.uow.posts().update_title(id, title).await
            }
            None => self.uow.posts().find_by_id(id).await,
        }
    }

    async fn delete_post(&self, id: i32) -> AppResult<bool> {
        let removed = self.uow.posts().delete(id).await?;
        tracing::info!(post_id = id, removed, "Post delete executed");
        Ok(true)
    }
}
