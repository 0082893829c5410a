//! Error types for signing and relaying.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

/// Error from OAuth 1.0a signature computation.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// A required signing input was empty.
    #[error("invalid signing input: {0} must not be empty")]
    InvalidInput(&'static str),
}

/// Error from relaying a post to the upstream API.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Inbound request body was malformed or incomplete.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// Authorization header could not be signed.
    #[error("signing failed")]
    Signing(#[from] SignError),

    /// Required credentials are absent from the configuration.
    #[error("credentials not configured")]
    MissingCredentials { required: Vec<&'static str> },

    /// Upstream API returned a non-success status.
    #[error("upstream rejected the post with status {status}")]
    UpstreamRejection { status: u16, details: Value },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a body we could not interpret.
    #[error("unexpected upstream response: {0}")]
    Transport(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidInput(_) | RelayError::UpstreamRejection { .. } => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Signing(_)
            | RelayError::MissingCredentials { .. }
            | RelayError::Http(_)
            | RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            RelayError::InvalidInput(message) => json!({ "error": message }),
            RelayError::MissingCredentials { required } => json!({
                "error": "Twitter OAuth 1.0a credentials not configured",
                "required": required,
            }),
            RelayError::UpstreamRejection { details, .. } => json!({
                "error": "Twitter API Error",
                "details": details,
            }),
            RelayError::Signing(_) | RelayError::Http(_) | RelayError::Transport(_) => json!({
                "error": "Internal server error",
                "message": self.to_string(),
            }),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "relay_failed");
        }
        (status, Json(self.body())).into_response()
    }
}
