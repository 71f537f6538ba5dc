//! Feed endpoint.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use pictor_common::{AppResult, PostView};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::Envelope};

/// Feed query parameters.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// How many posts to skip.
    #[serde(default)]
    pub offset: u64,
    /// Page size; server default when absent.
    pub limit: Option<u64>,
    /// Restrict the feed to a single user's posts.
    pub filter: Option<String>,
}

/// Feed page response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    /// Posts in display order.
    pub posts: Vec<PostView>,
    /// How many older matching posts remain.
    pub remaining: u64,
}

/// Get the viewer's feed page.
async fn get_feed(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Envelope<FeedResponse>> {
    let page = state
        .feed_service
        .get_feed(&viewer, query.offset, query.limit, query.filter.as_deref())
        .await?;

    Ok(Envelope::ok(FeedResponse {
        posts: page.posts,
        remaining: page.remaining,
    }))
}

/// Create the feed router.
pub fn router() -> Router<AppState> {
    Router::new().route("/feed", get(get_feed))
}
