//! Post repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use crate::domain::Post;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Post repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List all posts, oldest first
    async fn list(&self) -> AppResult<Vec<Post>>;

    /// Find post by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>>;

    /// Create a new post
    async fn create(&self, title: String) -> AppResult<Post>;

    /// Replace the title of an existing post; `None` if it does not exist
    async fn update_title(&self, id: i32, title: String) -> AppResult<Option<Post>>;

    /// Delete post by ID, returning the number of rows removed
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn list(&self) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Post::from))
    }

    async fn create(&self, title: String) -> AppResult<Post> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            title: Set(title),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn update_title(&self, id: i32, title: String) -> AppResult<Option<Post>> {
        let Some(existing) = PostEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.title = Set(title);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Post::from(model)))
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
