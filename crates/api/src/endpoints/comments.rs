//! Comment endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::post,
};
use pictor_common::AppResult;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::Envelope};

/// Like toggle response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// Whether the viewer likes the target after the toggle.
    pub have_liked: bool,
}

/// Toggle the viewer's like on a comment.
async fn toggle_like(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> AppResult<Envelope<LikeResponse>> {
    let have_liked = state
        .interaction_service
        .toggle_comment_like(&viewer.id, &comment_id)
        .await?;

    Ok(Envelope::ok(LikeResponse { have_liked }))
}

/// Create the comments router.
pub fn router() -> Router<AppState> {
    Router::new().route("/comments/{id}/like", post(toggle_like))
}
