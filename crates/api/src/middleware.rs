//! API middleware and application state.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use pictor_core::{
    AccountService, CommentService, FeedService, FollowService, InteractionService, PostService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login, and token resolution.
    pub account_service: AccountService,
    /// Feed composition.
    pub feed_service: FeedService,
    /// Follow toggling and suggestions.
    pub follow_service: FollowService,
    /// Like toggling on posts and comments.
    pub interaction_service: InteractionService,
    /// Comment creation.
    pub comment_service: CommentService,
    /// Post creation and lookup.
    pub post_service: PostService,
}

/// Authentication middleware: resolve a bearer token to the viewer and stash
/// them in request extensions. Routes that require a viewer reject via the
/// `AuthUser` extractor; the middleware itself never fails a request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.account_service.authenticate_by_token(token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(_) => tracing::debug!("bearer token did not resolve to a user"),
        }
    }

    next.run(req).await
}
