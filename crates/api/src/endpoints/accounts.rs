//! Account endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use pictor_common::{AppResult, UserView};
use pictor_core::RegisterInput;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::AuthUser,
    middleware::AppState,
    response::{Envelope, ok},
};

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Session response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Canonical username of the signed-in user.
    pub username: String,
}

/// Profile response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// The requested user, viewer-relative.
    pub user: UserView,
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<Envelope<SessionResponse>> {
    let session = state.account_service.register(input).await?;

    Ok(Envelope::ok(SessionResponse {
        token: session.token,
        username: session.user.username,
    }))
}

/// Sign in.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Envelope<SessionResponse>> {
    let session = state
        .account_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Envelope::ok(SessionResponse {
        token: session.token,
        username: session.user.username,
    }))
}

/// Sign out, invalidating the bearer token.
async fn logout(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.account_service.logout(viewer).await?;

    Ok(ok())
}

/// Get a user's profile.
async fn get_profile(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Envelope<ProfileResponse>> {
    let user = state.account_service.get_info(&viewer.id, &username).await?;

    Ok(Envelope::ok(ProfileResponse { user }))
}

/// Create the accounts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/{username}", get(get_profile))
}
