//! Comment like repository.

use std::sync::Arc;

use crate::entities::{CommentLike, comment_like};
use pictor_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, sea_query::OnConflict,
};

/// Comment like repository for database operations.
#[derive(Clone)]
pub struct CommentLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentLikeRepository {
    /// Create a new comment like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a like edge; the unique (user, comment) index makes this a
    /// no-op if the edge already exists. Returns the number of rows inserted
    /// (0 or 1).
    pub async fn insert_ignore(&self, model: comment_like::ActiveModel) -> AppResult<u64> {
        CommentLike::insert(model)
            .on_conflict(
                OnConflict::columns([
                    comment_like::Column::UserId,
                    comment_like::Column::CommentId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a like edge by pair. Returns the number of rows deleted
    /// (0 or 1), which tells the caller whether the edge existed.
    pub async fn delete_by_pair(&self, user_id: &str, comment_id: &str) -> AppResult<u64> {
        let result = CommentLike::delete_many()
            .filter(comment_like::Column::UserId.eq(user_id))
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Get all like edges on a set of comments.
    pub async fn find_by_comments(
        &self,
        comment_ids: &[String],
    ) -> AppResult<Vec<comment_like::Model>> {
        if comment_ids.is_empty() {
            return Ok(vec![]);
        }

        CommentLike::find()
            .filter(comment_like::Column::CommentId.is_in(comment_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_like(id: &str, user_id: &str, comment_id: &str) -> comment_like::Model {
        comment_like::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            comment_id: comment_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_insert_ignore_conflict_inserts_nothing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        let model = comment_like::ActiveModel {
            id: Set("l1".to_string()),
            user_id: Set("user1".to_string()),
            comment_id: Set("comment1".to_string()),
            ..Default::default()
        };
        let inserted = repo.insert_ignore(model).await.unwrap();

        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn test_find_by_comments() {
        let l1 = create_test_like("l1", "user1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1]])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        let result = repo.find_by_comments(&["c1".to_string()]).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id, "user1");
    }

    #[tokio::test]
    async fn test_find_by_comments_empty_input() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = CommentLikeRepository::new(db);
        let result = repo.find_by_comments(&[]).await.unwrap();

        assert!(result.is_empty());
    }
}
