//! Post endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use pictor_common::{AppResult, CommentView, PostView};
use pictor_core::{CreateCommentInput, CreatePostInput};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::Envelope};

/// Single-post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// The post, viewer-relative.
    pub post: PostView,
}

/// Like toggle response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// Whether the viewer likes the target after the toggle.
    pub have_liked: bool,
}

/// Created-comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    /// The created comment, viewer-relative.
    pub comment: CommentView,
}

/// Create a post.
async fn create_post(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostInput>,
) -> AppResult<Envelope<PostResponse>> {
    let post = state.post_service.create_post(&viewer, input).await?;

    Ok(Envelope::ok(PostResponse { post }))
}

/// Get a single post.
async fn get_post(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Envelope<PostResponse>> {
    let post = state.post_service.get_post(&viewer.id, &post_id).await?;

    Ok(Envelope::ok(PostResponse { post }))
}

/// Toggle the viewer's like on a post.
async fn toggle_like(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> AppResult<Envelope<LikeResponse>> {
    let have_liked = state
        .interaction_service
        .toggle_post_like(&viewer.id, &post_id)
        .await?;

    Ok(Envelope::ok(LikeResponse { have_liked }))
}

/// Comment on a post.
async fn create_comment(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(input): Json<CreateCommentInput>,
) -> AppResult<Envelope<CommentResponse>> {
    let comment = state
        .comment_service
        .create_comment(&viewer, &post_id, input)
        .await?;

    Ok(Envelope::ok(CommentResponse { comment }))
}

/// Create the posts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}/like", post(toggle_like))
        .route("/posts/{id}/comments", post(create_comment))
}
