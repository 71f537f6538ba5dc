//! Feed API bindings.
//!
//! [`FeedApi`] is the seam the controller drives; [`HttpFeedApi`] implements
//! it over HTTP with a bearer token, unwrapping the `{success, error?, ...}`
//! envelope into typed payloads.

use async_trait::async_trait;
use pictor_common::{CommentView, PostView, UserView};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

/// One page of the feed.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSlice {
    /// Posts in display order.
    pub posts: Vec<PostView>,
    /// How many further matching posts exist past this page.
    pub remaining: u64,
}

/// The server operations the feed controller depends on.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch a feed page.
    async fn get_posts(&self, offset: u64, limit: u64) -> ClientResult<FeedSlice>;

    /// Fetch follow suggestions.
    async fn get_suggestions(&self) -> ClientResult<Vec<UserView>>;

    /// Toggle following a user; returns the resulting follow state.
    async fn toggle_follow(&self, username: &str) -> ClientResult<bool>;

    /// Toggle a post like; returns the resulting like state.
    async fn toggle_post_like(&self, post_id: &str) -> ClientResult<bool>;

    /// Toggle a comment like; returns the resulting like state.
    async fn toggle_comment_like(&self, comment_id: &str) -> ClientResult<bool>;

    /// Comment on a post; returns the created comment.
    async fn create_comment(
        &self,
        post_id: &str,
        text: &str,
        parent_comment_id: Option<&str>,
    ) -> ClientResult<CommentView>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionsPayload {
    suggestions: Vec<UserView>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowPayload {
    following: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikePayload {
    have_liked: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentPayload {
    comment: CommentView,
}

/// HTTP implementation of [`FeedApi`].
#[derive(Clone, Debug)]
pub struct HttpFeedApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpFeedApi {
    /// Create a binding against `base_url` authenticated as `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::unwrap_envelope(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        Self::unwrap_envelope(request.send().await?).await
    }

    /// Unwrap the response envelope: `success: true` yields the payload,
    /// anything else yields the server's `error` message.
    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let value: serde_json::Value = response.json().await?;

        if value.get("success").and_then(serde_json::Value::as_bool) == Some(true) {
            Ok(serde_json::from_value(value)?)
        } else {
            let message = value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("request rejected")
                .to_string();
            Err(ClientError::Api(message))
        }
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn get_posts(&self, offset: u64, limit: u64) -> ClientResult<FeedSlice> {
        self.get(&format!("/feed?offset={offset}&limit={limit}"))
            .await
    }

    async fn get_suggestions(&self) -> ClientResult<Vec<UserView>> {
        let payload: SuggestionsPayload = self.get("/suggestions").await?;

        Ok(payload.suggestions)
    }

    async fn toggle_follow(&self, username: &str) -> ClientResult<bool> {
        let payload: FollowPayload = self.post(&format!("/follow/{username}"), None).await?;

        Ok(payload.following)
    }

    async fn toggle_post_like(&self, post_id: &str) -> ClientResult<bool> {
        let payload: LikePayload = self.post(&format!("/posts/{post_id}/like"), None).await?;

        Ok(payload.have_liked)
    }

    async fn toggle_comment_like(&self, comment_id: &str) -> ClientResult<bool> {
        let payload: LikePayload = self
            .post(&format!("/comments/{comment_id}/like"), None)
            .await?;

        Ok(payload.have_liked)
    }

    async fn create_comment(
        &self,
        post_id: &str,
        text: &str,
        parent_comment_id: Option<&str>,
    ) -> ClientResult<CommentView> {
        let body = serde_json::json!({
            "text": text,
            "parentCommentId": parent_comment_id,
        });
        let payload: CommentPayload = self
            .post(&format!("/posts/{post_id}/comments"), Some(body))
            .await?;

        Ok(payload.comment)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_slice_decodes_from_envelope() {
        let value = serde_json::json!({
            "success": true,
            "posts": [],
            "remaining": 7,
        });

        let slice: FeedSlice = serde_json::from_value(value).unwrap();
        assert!(slice.posts.is_empty());
        assert_eq!(slice.remaining, 7);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpFeedApi::new("http://localhost:3000/", "tok");
        assert_eq!(api.url("/feed"), "http://localhost:3000/feed");
    }
}
