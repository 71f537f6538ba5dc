//! API response envelope.
//!
//! Every payload is wrapped in `{success: true, ...payload}`; error paths go
//! through `AppError`'s `IntoResponse`, which emits
//! `{success: false, error}` with the matching status code.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;
use serde_json::json;

/// Success envelope with a flattened payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    /// Always `true`; failures never reach this type.
    pub success: bool,
    /// Endpoint-specific payload, flattened into the envelope object.
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a payload in a success envelope.
    pub const fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Bare `{success: true}` response for endpoints without a payload.
#[must_use]
pub fn ok() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct LikePayload {
        have_liked: bool,
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let envelope = Envelope::ok(LikePayload { have_liked: true });

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["haveLiked"], true);
    }
}
