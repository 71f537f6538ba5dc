//! Comment service.

use pictor_common::{AppError, AppResult, CommentView, IdGenerator};
use pictor_db::{
    entities::{comment, user},
    repositories::{CommentRepository, PostRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a comment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    /// Comment text.
    #[validate(length(min = 1, max = 2048))]
    pub text: String,

    /// Parent comment ID for a one-level threaded reply.
    pub parent_comment_id: Option<String>,
}

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(post_repo: PostRepository, comment_repo: CommentRepository) -> Self {
        Self {
            post_repo,
            comment_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a comment on a post.
    ///
    /// The parent, if given, must exist and belong to the same post; nothing
    /// is written when any check fails.
    pub async fn create_comment(
        &self,
        viewer: &user::Model,
        post_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<CommentView> {
        input.validate()?;

        let text = input.text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(
                "Comment text must not be empty".to_string(),
            ));
        }

        let post = self.post_repo.get_by_id(post_id).await?;

        if let Some(ref parent_id) = input.parent_comment_id {
            let parent = self.comment_repo.get_by_id(parent_id).await?;
            if parent.post_id != post.id {
                return Err(AppError::Reference(
                    "Parent comment belongs to a different post".to_string(),
                ));
            }
        }

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post.id),
            user_id: Set(viewer.id.clone()),
            parent_id: Set(input.parent_comment_id),
            text: Set(text.to_string()),
            ..Default::default()
        };
        let created = self.comment_repo.create(model).await?;

        tracing::debug!(comment_id = %created.id, post_id = %created.post_id, "Comment created");

        Ok(CommentView {
            id: created.id,
            post_id: created.post_id,
            parent_comment_id: created.parent_id,
            poster: viewer.username.clone(),
            text: created.text,
            likes: 0,
            have_liked: false,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pictor_db::entities::post;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_viewer() -> user::Model {
        user::Model {
            id: "u1".to_string(),
            username: "alice".to_string(),
            username_lower: "alice".to_string(),
            name: None,
            avatar_url: None,
            password_hash: "hash".to_string(),
            token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_post(id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            user_id: "u2".to_string(),
            text: "a post".to_string(),
            media_url: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_comment(id: &str, post_id: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            post_id: post_id.to_string(),
            user_id: "u2".to_string(),
            parent_id: None,
            text: "parent".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: Arc<DatabaseConnection>) -> CommentService {
        CommentService::new(PostRepository::new(db.clone()), CommentRepository::new(db))
    }

    #[tokio::test]
    async fn test_create_comment_blank_text_writes_nothing() {
        // No mock results: any query would fail the test.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let input = CreateCommentInput {
            text: "   ".to_string(),
            parent_comment_id: None,
        };
        let result = service(db).create_comment(&test_viewer(), "p1", input).await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_create_comment_cross_post_parent_writes_nothing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1")]])
                // parent exists, but on a different post
                .append_query_results([[test_comment("c9", "p2")]])
                .into_connection(),
        );

        let input = CreateCommentInput {
            text: "reply".to_string(),
            parent_comment_id: Some("c9".to_string()),
        };
        let result = service(db).create_comment(&test_viewer(), "p1", input).await;

        match result {
            Err(AppError::Reference(msg)) => assert!(msg.contains("different post")),
            _ => panic!("Expected Reference error"),
        }
    }

    #[tokio::test]
    async fn test_create_comment_missing_parent_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1")]])
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let input = CreateCommentInput {
            text: "reply".to_string(),
            parent_comment_id: Some("missing".to_string()),
        };
        let result = service(db).create_comment(&test_viewer(), "p1", input).await;

        match result {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected CommentNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_create_comment_returns_fresh_view() {
        let created = comment::Model {
            id: "c1".to_string(),
            post_id: "p1".to_string(),
            user_id: "u1".to_string(),
            parent_id: None,
            text: "first!".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_post("p1")]])
                .append_query_results([[created]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let input = CreateCommentInput {
            text: "first!".to_string(),
            parent_comment_id: None,
        };
        let view = service(db)
            .create_comment(&test_viewer(), "p1", input)
            .await
            .unwrap();

        assert_eq!(view.poster, "alice");
        assert_eq!(view.likes, 0);
        assert!(!view.have_liked);
        assert_eq!(view.post_id, "p1");
    }
}
