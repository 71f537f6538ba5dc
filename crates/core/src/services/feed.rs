//! Feed composition service.

use pictor_common::{AppResult, Config, PostView};
use pictor_db::{
    entities::user,
    repositories::{FollowingRepository, PostRepository, UserRepository},
};

use crate::projection::Projector;

/// Hard cap on requested page size.
const MAX_PAGE_SIZE: u64 = 100;

/// One page of a feed.
#[derive(Clone, Debug)]
pub struct FeedPage {
    /// Posts in display order (newest first, ties by descending ID).
    pub posts: Vec<PostView>,
    /// How many older matching posts remain past this page.
    pub remaining: u64,
}

/// Feed service for business logic.
#[derive(Clone)]
pub struct FeedService {
    user_repo: UserRepository,
    post_repo: PostRepository,
    following_repo: FollowingRepository,
    projector: Projector,
    page_size: u64,
}

impl FeedService {
    /// Create a new feed service.
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        post_repo: PostRepository,
        following_repo: FollowingRepository,
        projector: Projector,
        config: &Config,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            following_repo,
            projector,
            page_size: config.feed.page_size,
        }
    }

    /// Get a feed page for the viewer.
    ///
    /// Without a filter, the scope is the viewer's own posts plus posts by
    /// everyone they follow. With `filter = Some(username)`, the scope is
    /// that single user's posts (the profile page feed).
    ///
    /// Offset pagination is not stable against concurrent inserts; a post
    /// created between two fetches shifts later offsets. Clients reconcile
    /// pages by post identity rather than position.
    pub async fn get_feed(
        &self,
        viewer: &user::Model,
        offset: u64,
        limit: Option<u64>,
        filter: Option<&str>,
    ) -> AppResult<FeedPage> {
        let limit = limit.unwrap_or(self.page_size).clamp(1, MAX_PAGE_SIZE);

        let user_ids = match filter {
            Some(username) => vec![self.user_repo.get_by_username(username).await?.id],
            None => {
                let mut ids = self.following_repo.find_followee_ids(&viewer.id).await?;
                ids.push(viewer.id.clone());
                ids
            }
        };

        let rows = self.post_repo.find_feed(&user_ids, limit, offset).await?;
        let total = self.post_repo.count_feed(&user_ids).await?;
        let returned = rows.len() as u64;
        let posts = self.projector.post_views(&viewer.id, rows).await?;

        Ok(FeedPage {
            posts,
            remaining: remaining_after(total, offset, returned),
        })
    }
}

/// Posts left past this page: total matching minus everything at or before
/// the end of the page, clamped to zero for overshooting offsets.
const fn remaining_after(total: u64, offset: u64, returned: u64) -> u64 {
    total.saturating_sub(offset.saturating_add(returned))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::projection::Projector;
    use chrono::Utc;
    use pictor_common::config::{DatabaseConfig, FeedConfig, ServerConfig};
    use pictor_db::repositories::{CommentLikeRepository, CommentRepository, PostLikeRepository};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                url: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            feed: FeedConfig::default(),
        }
    }

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

    fn service(db: Arc<DatabaseConnection>) -> FeedService {
        let projector = Projector::new(
            UserRepository::new(db.clone()),
            PostRepository::new(db.clone()),
            CommentRepository::new(db.clone()),
            FollowingRepository::new(db.clone()),
            PostLikeRepository::new(db.clone()),
            CommentLikeRepository::new(db.clone()),
        );
        FeedService::new(
            UserRepository::new(db.clone()),
            PostRepository::new(db.clone()),
            FollowingRepository::new(db),
            projector,
            &test_config(),
        )
    }

    #[test]
    fn test_remaining_counts_posts_past_the_page() {
        // 12 total, first page of 10: 2 older posts left.
        assert_eq!(remaining_after(12, 0, 10), 2);
        // second page returns the last 2: nothing left.
        assert_eq!(remaining_after(12, 10, 2), 0);
    }

    #[test]
    fn test_remaining_clamps_to_zero() {
        // offset past the end must not underflow
        assert_eq!(remaining_after(5, 10, 0), 0);
        assert_eq!(remaining_after(0, 0, 0), 0);
    }

    #[tokio::test]
    async fn test_empty_feed_returns_empty_page() {
        use maplit::btreemap;
        use sea_orm::Value;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // no followees
                .append_query_results([Vec::<std::collections::BTreeMap<&str, Value>>::new()])
                // no posts by the viewer either
                .append_query_results([Vec::<pictor_db::entities::post::Model>::new()])
                // total matching: 0
                .append_query_results([vec![
                    btreemap! { "num_items" => Value::BigInt(Some(0)) },
                ]])
                .into_connection(),
        );

        let page = service(db)
            .get_feed(&test_viewer(), 0, None, None)
            .await
            .unwrap();

        assert!(page.posts.is_empty());
        assert_eq!(page.remaining, 0);
    }
}
