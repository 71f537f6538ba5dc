//! Viewer-relative projection.
//!
//! Turns entity rows into `UserView`/`PostView`/`CommentView` as seen by a
//! specific viewer. `am_following` and `have_liked` depend on who is asking,
//! so projected views are computed per request and never cached across
//! viewers. All counts are derived from edge rows; there are no stored
//! counters to drift out of sync.

use std::collections::{HashMap, HashSet};

use pictor_common::{AppError, AppResult, CommentView, PostView, UserView};
use pictor_db::{
    entities::{post, user},
    repositories::{
        CommentLikeRepository, CommentRepository, FollowingRepository, PostLikeRepository,
        PostRepository, UserRepository,
    },
};

/// Builds viewer-relative views from entity rows.
#[derive(Clone)]
pub struct Projector {
    user_repo: UserRepository,
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    following_repo: FollowingRepository,
    post_like_repo: PostLikeRepository,
    comment_like_repo: CommentLikeRepository,
}

impl Projector {
    /// Create a new projector.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        post_repo: PostRepository,
        comment_repo: CommentRepository,
        following_repo: FollowingRepository,
        post_like_repo: PostLikeRepository,
        comment_like_repo: CommentLikeRepository,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            comment_repo,
            following_repo,
            post_like_repo,
            comment_like_repo,
        }
    }

    /// Project a single user as seen by the viewer.
    pub async fn user_view(&self, viewer_id: &str, user: &user::Model) -> AppResult<UserView> {
        let am_following = if user.id == viewer_id {
            false
        } else {
            self.following_repo
                .is_following(viewer_id, &user.id)
                .await?
        };

        self.user_view_with_follow_state(user, am_following).await
    }

    /// Project a user whose follow state the caller already knows, saving
    /// the edge lookup.
    pub async fn user_view_with_follow_state(
        &self,
        user: &user::Model,
        am_following: bool,
    ) -> AppResult<UserView> {
        let posts = self.post_repo.count_by_user(&user.id).await?;
        let followers = self.following_repo.count_followers(&user.id).await?;
        let following = self.following_repo.count_following(&user.id).await?;

        Ok(UserView {
            username: user.username.clone(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            posts,
            followers,
            following,
            am_following,
        })
    }

    /// Project a single post as seen by the viewer.
    pub async fn post_view(&self, viewer_id: &str, post: post::Model) -> AppResult<PostView> {
        self.post_views(viewer_id, vec![post])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("projection dropped a post".to_string()))
    }

    /// Project a page of posts as seen by the viewer.
    ///
    /// Batches the lookups so a page costs a fixed number of queries for
    /// comments, users, follow edges, and like edges, plus the per-poster
    /// count queries. Input order is preserved.
    pub async fn post_views(
        &self,
        viewer_id: &str,
        posts: Vec<post::Model>,
    ) -> AppResult<Vec<PostView>> {
        if posts.is_empty() {
            return Ok(vec![]);
        }

        let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
        let comments = self.comment_repo.find_by_posts(&post_ids).await?;
        let comment_ids: Vec<String> = comments.iter().map(|c| c.id.clone()).collect();

        // Posters first (in order of appearance), then comment authors.
        let mut user_ids: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for post in &posts {
            if seen.insert(post.user_id.clone()) {
                user_ids.push(post.user_id.clone());
            }
        }
        let poster_count = user_ids.len();
        for comment in &comments {
            if seen.insert(comment.user_id.clone()) {
                user_ids.push(comment.user_id.clone());
            }
        }

        let users: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let followees: HashSet<String> = self
            .following_repo
            .find_followee_ids(viewer_id)
            .await?
            .into_iter()
            .collect();

        let mut post_like_counts: HashMap<String, u64> = HashMap::new();
        let mut liked_posts: HashSet<String> = HashSet::new();
        for edge in self.post_like_repo.find_by_posts(&post_ids).await? {
            *post_like_counts.entry(edge.post_id.clone()).or_default() += 1;
            if edge.user_id == viewer_id {
                liked_posts.insert(edge.post_id);
            }
        }

        let mut comment_like_counts: HashMap<String, u64> = HashMap::new();
        let mut liked_comments: HashSet<String> = HashSet::new();
        for edge in self.comment_like_repo.find_by_comments(&comment_ids).await? {
            *comment_like_counts.entry(edge.comment_id.clone()).or_default() += 1;
            if edge.user_id == viewer_id {
                liked_comments.insert(edge.comment_id);
            }
        }

        // Poster stats, in the deterministic order collected above.
        let mut poster_views: HashMap<String, UserView> = HashMap::new();
        for user_id in &user_ids[..poster_count] {
            let user = users
                .get(user_id)
                .ok_or_else(|| AppError::Internal(format!("Missing user row: {user_id}")))?;
            let view = self
                .user_view_with_follow_state(user, followees.contains(user_id))
                .await?;
            poster_views.insert(user_id.clone(), view);
        }

        // Comments grouped per post, already in append order from the query.
        let mut comments_by_post: HashMap<String, Vec<CommentView>> = HashMap::new();
        for comment in comments {
            let poster = users
                .get(&comment.user_id)
                .map(|u| u.username.clone())
                .ok_or_else(|| {
                    AppError::Internal(format!("Missing user row: {}", comment.user_id))
                })?;
            let view = CommentView {
                id: comment.id.clone(),
                post_id: comment.post_id.clone(),
                parent_comment_id: comment.parent_id,
                poster,
                text: comment.text,
                likes: comment_like_counts.get(&comment.id).copied().unwrap_or(0),
                have_liked: liked_comments.contains(&comment.id),
            };
            comments_by_post.entry(comment.post_id).or_default().push(view);
        }

        let mut views = Vec::with_capacity(posts.len());
        for post in posts {
            let poster = poster_views
                .get(&post.user_id)
                .cloned()
                .ok_or_else(|| AppError::Internal(format!("Missing user row: {}", post.user_id)))?;
            views.push(PostView {
                id: post.id.clone(),
                poster,
                text: post.text,
                media_url: post.media_url,
                created_at: post.created_at.into(),
                likes: post_like_counts.get(&post.id).copied().unwrap_or(0),
                have_liked: liked_posts.contains(&post.id),
                comments: comments_by_post.remove(&post.id).unwrap_or_default(),
            });
        }

        Ok(views)
    }
}
