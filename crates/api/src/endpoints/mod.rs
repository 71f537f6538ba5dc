//! API endpoints.

mod accounts;
mod comments;
mod feed;
mod follow;
mod posts;
mod suggestions;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(feed::router())
        .merge(suggestions::router())
        .merge(follow::router())
        .merge(posts::router())
        .merge(comments::router())
        .nest("/accounts", accounts::router())
}
