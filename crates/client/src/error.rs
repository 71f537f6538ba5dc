//! Client-side error taxonomy.

use thiserror::Error;

/// Errors surfaced by the feed client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with `success: false`; carries its `error` message.
    #[error("{0}")]
    Api(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client result type.
pub type ClientResult<T> = Result<T, ClientError>;
