//! Post service.

use pictor_common::{AppError, AppResult, IdGenerator, PostView};
use pictor_db::{
    entities::{post, user},
    repositories::PostRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::projection::Projector;

/// Input for creating a post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    /// Post text.
    #[validate(length(min = 1, max = 4096))]
    pub text: String,

    /// Attached media reference.
    #[validate(length(max = 1024))]
    pub media_url: Option<String>,
}

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    projector: Projector,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(post_repo: PostRepository, projector: Projector) -> Self {
        Self {
            post_repo,
            projector,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a post owned by the viewer.
    pub async fn create_post(
        &self,
        viewer: &user::Model,
        input: CreatePostInput,
    ) -> AppResult<PostView> {
        input.validate()?;

        let text = input.text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(
                "Post text must not be empty".to_string(),
            ));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(viewer.id.clone()),
            text: Set(text.to_string()),
            media_url: Set(input.media_url),
            ..Default::default()
        };
        let created = self.post_repo.create(model).await?;

        tracing::debug!(post_id = %created.id, user_id = %viewer.id, "Post created");

        // Fresh post: no likes, no comments; only the poster stats need
        // looking up.
        let poster = self.projector.user_view(&viewer.id, viewer).await?;
        Ok(PostView {
            id: created.id,
            poster,
            text: created.text,
            media_url: created.media_url,
            created_at: created.created_at.into(),
            likes: 0,
            have_liked: false,
            comments: vec![],
        })
    }

    /// Get a single post as seen by the viewer.
    pub async fn get_post(&self, viewer_id: &str, post_id: &str) -> AppResult<PostView> {
        let post = self.post_repo.get_by_id(post_id).await?;
        self.projector.post_view(viewer_id, post).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pictor_db::repositories::{
        CommentLikeRepository, CommentRepository, FollowingRepository, PostLikeRepository,
        UserRepository,
    };
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
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

    fn service(db: Arc<DatabaseConnection>) -> PostService {
        let projector = Projector::new(
            UserRepository::new(db.clone()),
            PostRepository::new(db.clone()),
            CommentRepository::new(db.clone()),
            FollowingRepository::new(db.clone()),
            PostLikeRepository::new(db.clone()),
            CommentLikeRepository::new(db.clone()),
        );
        PostService::new(PostRepository::new(db), projector)
    }

    #[tokio::test]
    async fn test_create_post_blank_text_writes_nothing() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let input = CreatePostInput {
            text: "\n  ".to_string(),
            media_url: None,
        };
        let result = service(db).create_post(&test_viewer(), input).await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_get_post_missing_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let result = service(db).get_post("u1", "missing").await;

        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected PostNotFound error"),
        }
    }
}
