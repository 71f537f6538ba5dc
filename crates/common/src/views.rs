//! Viewer-relative wire types.
//!
//! These are the payload shapes exchanged between the API layer and clients.
//! `am_following` and `have_liked` are computed per requesting viewer at
//! response time; they are never attributes of the underlying entity and
//! must never be cached across viewers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as seen by a specific viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Unique username.
    pub username: String,
    /// Display name.
    pub name: Option<String>,
    /// Profile photo reference.
    pub avatar_url: Option<String>,
    /// Number of posts, derived from post rows.
    pub posts: u64,
    /// Number of followers, derived from follow edges.
    pub followers: u64,
    /// Number of followees, derived from follow edges.
    pub following: u64,
    /// Whether the requesting viewer follows this user.
    pub am_following: bool,
}

/// A post as seen by a specific viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// Post ID.
    pub id: String,
    /// The posting user, viewer-relative.
    pub poster: UserView,
    /// Text content.
    pub text: String,
    /// Attached media reference, if any.
    pub media_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Like count, derived from like edges.
    pub likes: u64,
    /// Whether the requesting viewer has liked this post.
    pub have_liked: bool,
    /// Comments in append order.
    pub comments: Vec<CommentView>,
}

/// A comment as seen by a specific viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment ID.
    pub id: String,
    /// Owning post ID.
    pub post_id: String,
    /// Parent comment ID, if this is a threaded reply.
    pub parent_comment_id: Option<String>,
    /// Username of the commenting user.
    pub poster: String,
    /// Text content.
    pub text: String,
    /// Like count, derived from like edges.
    pub likes: u64,
    /// Whether the requesting viewer has liked this comment.
    pub have_liked: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_post_view_serializes_camel_case() {
        let view = PostView {
            id: "p1".to_string(),
            poster: UserView {
                username: "alice".to_string(),
                name: None,
                avatar_url: None,
                posts: 1,
                followers: 0,
                following: 0,
                am_following: false,
            },
            text: "hello".to_string(),
            media_url: None,
            created_at: Utc::now(),
            likes: 3,
            have_liked: false,
            comments: vec![],
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["haveLiked"], false);
        assert_eq!(json["likes"], 3);
        assert_eq!(json["poster"]["amFollowing"], false);
    }
}
