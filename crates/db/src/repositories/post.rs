//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, post};
use pictor_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a feed page: posts owned by any of `user_ids`, newest first.
    /// `created_at DESC, id DESC` is a total order, so offset pagination is
    /// at least deterministic between fetches.
    ///
    /// Offset pagination is unsafe against concurrent inserts: a post
    /// created between two fetches shifts every later offset. Callers
    /// reconcile by entity identity, not position.
    pub async fn find_feed(
        &self,
        user_ids: &[String],
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }

        Post::find()
            .filter(post::Column::UserId.is_in(user_ids.to_vec()))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all posts owned by any of `user_ids`.
    pub async fn count_feed(&self, user_ids: &[String]) -> AppResult<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        Post::find()
            .filter(post::Column::UserId.is_in(user_ids.to_vec()))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts owned by a single user.
    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    fn create_test_post(id: &str, user_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            text: "Test post".to_string(),
            media_url: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let post = create_test_post("p1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_id("p1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().user_id, "u1");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_feed() {
        let p1 = create_test_post("p2", "u1");
        let p2 = create_test_post("p1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo
            .find_feed(&["u1".to_string(), "u2".to_string()], 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_feed_no_users() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = PostRepository::new(db);
        let result = repo.find_feed(&[], 10, 0).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_count_feed() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[btreemap! {
                    "num_items" => Value::BigInt(Some(12)),
                }]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.count_feed(&["u1".to_string()]).await.unwrap();

        assert_eq!(result, 12);
    }
}
