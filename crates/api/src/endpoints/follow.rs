//! Follow endpoint.

use axum::{
    Router,
    extract::{Path, State},
    routing::post,
};
use pictor_common::AppResult;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::Envelope};

/// Follow toggle response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    /// Whether the viewer follows the target after the toggle.
    pub following: bool,
}

/// Toggle following a user.
async fn toggle_follow(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Envelope<FollowResponse>> {
    let following = state.follow_service.toggle_follow(&viewer, &username).await?;

    Ok(Envelope::ok(FollowResponse { following }))
}

/// Create the follow router.
pub fn router() -> Router<AppState> {
    Router::new().route("/follow/{username}", post(toggle_follow))
}
