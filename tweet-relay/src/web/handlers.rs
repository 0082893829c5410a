//! Relay endpoint handlers.
//!
//! Each relay request goes through four steps:
//! 1. Validate the inbound body
//! 2. Resolve credentials and build the Authorization header
//! 3. Issue one outbound POST
//! 4. Translate the outcome into the inbound response

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::Authenticator;
use crate::error::RelayError;
use crate::oauth::{NonceSource, SystemNonceSource};
use crate::upstream::TweetClient;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: TweetClient,
    pub nonces: Arc<dyn NonceSource>,
}

impl AppState {
    pub fn new(config: Config, client: TweetClient) -> Self {
        Self {
            config: Arc::new(config),
            client,
            nonces: Arc::new(SystemNonceSource),
        }
    }

    /// Replace the nonce/timestamp source, e.g. to pin signatures in tests.
    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }
}

// =============================================================================
// Status / Health
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Root status endpoint.
pub async fn status() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Twitter webhook server is running!",
    })
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Relay
// =============================================================================

/// Optional caller metadata, logged only.
#[derive(Debug, Default, Deserialize)]
pub struct RelayContext {
    /// Ticket ids arrive as numbers or strings depending on the caller.
    #[serde(default, rename = "ticketId")]
    pub ticket_id: Option<Value>,
    #[serde(default, rename = "agentName")]
    pub agent_name: Option<String>,
}

/// Inbound relay payload.
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub context: Option<RelayContext>,
}

/// Relay success response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    pub message: &'static str,
    pub tweet_id: String,
    pub tweet_url: String,
}

/// CORS preflight.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any method other than POST/OPTIONS on the relay route.
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    warn!(method = %method, "relay_method_not_allowed");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// Relay endpoint: forward `text` as a new post.
pub async fn relay_tweet(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Json<RelayResponse>, RelayError> {
    let Json(request) = payload.map_err(|e| {
        warn!(error = %e, "relay_body_rejected");
        RelayError::InvalidInput(format!("Invalid JSON body: {}", e.body_text()))
    })?;

    let context = request.context.unwrap_or_default();
    let text = match request.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!(ticket_id = ?context.ticket_id, "relay_text_missing");
            return Err(RelayError::InvalidInput(
                "Missing required field: text".to_string(),
            ));
        }
    };

    info!(
        text_length = text.len(),
        ticket_id = ?context.ticket_id,
        agent_name = ?context.agent_name,
        "relay_request_received"
    );

    let authenticator = Authenticator::from_config(&state.config).map_err(|e| {
        warn!(error = %e, "relay_credentials_missing");
        e
    })?;

    let authorization = authenticator.authorization_header(
        "POST",
        state.client.endpoint(),
        state.nonces.as_ref(),
    )?;

    let tweet = state.client.post_tweet(&authorization, &text).await?;

    info!(
        tweet_id = %tweet.id,
        auth_mode = authenticator.mode(),
        ticket_id = ?context.ticket_id,
        agent_name = ?context.agent_name,
        "tweet_posted"
    );

    Ok(Json(RelayResponse {
        success: true,
        message: "Tweet posted successfully",
        tweet_url: tweet.url(),
        tweet_id: tweet.id,
    }))
}
