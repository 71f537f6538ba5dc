//! Post like repository.

use std::sync::Arc;

use crate::entities::{PostLike, post_like};
use pictor_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, sea_query::OnConflict,
};

/// Post like repository for database operations.
#[derive(Clone)]
pub struct PostLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl PostLikeRepository {
    /// Create a new post like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a like edge; the unique (user, post) index makes this a no-op
    /// if the edge already exists. Returns the number of rows inserted
    /// (0 or 1).
    pub async fn insert_ignore(&self, model: post_like::ActiveModel) -> AppResult<u64> {
        PostLike::insert(model)
            .on_conflict(
                OnConflict::columns([post_like::Column::UserId, post_like::Column::PostId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a like edge by pair. Returns the number of rows deleted
    /// (0 or 1), which tells the caller whether the edge existed.
    pub async fn delete_by_pair(&self, user_id: &str, post_id: &str) -> AppResult<u64> {
        let result = PostLike::delete_many()
            .filter(post_like::Column::UserId.eq(user_id))
            .filter(post_like::Column::PostId.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Get all like edges on a set of posts. Like counts and viewer
    /// membership are both derived from these edges.
    pub async fn find_by_posts(&self, post_ids: &[String]) -> AppResult<Vec<post_like::Model>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        PostLike::find()
            .filter(post_like::Column::PostId.is_in(post_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
