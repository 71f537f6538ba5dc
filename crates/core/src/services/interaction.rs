//! Like toggling for posts and comments.

use pictor_common::{AppResult, IdGenerator};
use pictor_db::{
    entities::{comment_like, post_like},
    repositories::{CommentLikeRepository, CommentRepository, PostLikeRepository, PostRepository},
};
use sea_orm::Set;

/// Interaction service for business logic.
#[derive(Clone)]
pub struct InteractionService {
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    post_like_repo: PostLikeRepository,
    comment_like_repo: CommentLikeRepository,
    id_gen: IdGenerator,
}

impl InteractionService {
    /// Create a new interaction service.
    #[must_use]
    pub fn new(
        post_repo: PostRepository,
        comment_repo: CommentRepository,
        post_like_repo: PostLikeRepository,
        comment_like_repo: CommentLikeRepository,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
            post_like_repo,
            comment_like_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the viewer's like on a post.
    ///
    /// Returns whether the viewer likes the post afterwards. Delete first;
    /// the row count says whether an edge existed, and the insert relies on
    /// the unique pair index so concurrent toggles cannot double-like.
    pub async fn toggle_post_like(&self, viewer_id: &str, post_id: &str) -> AppResult<bool> {
        let post = self.post_repo.get_by_id(post_id).await?;

        let deleted = self
            .post_like_repo
            .delete_by_pair(viewer_id, &post.id)
            .await?;
        if deleted > 0 {
            return Ok(false);
        }

        let model = post_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(viewer_id.to_string()),
            post_id: Set(post.id),
            ..Default::default()
        };
        self.post_like_repo.insert_ignore(model).await?;

        Ok(true)
    }

    /// Toggle the viewer's like on a comment.
    pub async fn toggle_comment_like(&self, viewer_id: &str, comment_id: &str) -> AppResult<bool> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;

        let deleted = self
            .comment_like_repo
            .delete_by_pair(viewer_id, &comment.id)
            .await?;
        if deleted > 0 {
            return Ok(false);
        }

        let model = comment_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(viewer_id.to_string()),
            comment_id: Set(comment.id),
            ..Default::default()
        };
        self.comment_like_repo.insert_ignore(model).await?;

        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pictor_common::AppError;
    use pictor_db::entities::{comment, post};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_post(id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: "u2".to_string(),
            text: "a post".to_string(),
            media_url: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_comment(id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            post_id: "p1".to_string(),
            user_id: "u2".to_string(),
            parent_id: None,
            text: "a comment".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<DatabaseConnection>) -> InteractionService {
        InteractionService::new(
            PostRepository::new(db.clone()),
            CommentRepository::new(db.clone()),
            PostLikeRepository::new(db.clone()),
            CommentLikeRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_toggle_post_like_missing_post_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let result = service(db).toggle_post_like("u1", "missing").await;

        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_toggle_post_like_on_then_off() {
        // First toggle: no edge deleted, one inserted.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1")]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );
        let liked = service(db).toggle_post_like("u1", "p1").await.unwrap();
        assert!(liked);

        // Second toggle: the edge exists, the delete removes it.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1")]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let liked = service(db).toggle_post_like("u1", "p1").await.unwrap();
        assert!(!liked);
    }

    #[tokio::test]
    async fn test_toggle_comment_like_on() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_comment("c1")]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let liked = service(db).toggle_comment_like("u1", "c1").await.unwrap();

        assert!(liked);
    }

    #[tokio::test]
    async fn test_toggle_comment_like_missing_comment_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let result = service(db).toggle_comment_like("u1", "missing").await;

        match result {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected CommentNotFound error"),
        }
    }
}
