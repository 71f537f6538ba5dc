//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use pictor_common::AppError;
use pictor_db::entities::user;

/// Authenticated viewer extractor.
///
/// Rejects with the standard `{success: false, error}` envelope when the
/// auth middleware did not resolve a viewer.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by the auth middleware when the bearer token resolves.
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}
