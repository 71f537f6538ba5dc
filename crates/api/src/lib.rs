//! HTTP API layer for pictor.
//!
//! - **Endpoints**: feed, suggestions, follow, posts, comments, accounts
//! - **Extractors**: authenticated-viewer extraction
//! - **Middleware**: bearer-token resolution, application state
//! - **Response**: the `{success, error?, ...payload}` envelope
//!
//! Built on Axum 0.8 with a Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
