//! Follow-suggestion endpoint.

use axum::{Router, extract::State, routing::get};
use pictor_common::{AppResult, UserView};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::Envelope};

/// Suggestions response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    /// Suggested users, best first.
    pub suggestions: Vec<UserView>,
}

/// Get follow suggestions for the viewer.
async fn get_suggestions(
    AuthUser(viewer): AuthUser,
    State(state): State<AppState>,
) -> AppResult<Envelope<SuggestionsResponse>> {
    let suggestions = state.follow_service.get_suggestions(&viewer).await?;

    Ok(Envelope::ok(SuggestionsResponse { suggestions }))
}

/// Create the suggestions router.
pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions", get(get_suggestions))
}
