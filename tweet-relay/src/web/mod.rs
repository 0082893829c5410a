//! Web server module for the relay endpoint.
//!
//! Routes:
//! - `GET /` and `GET /health`: liveness
//! - `POST /api/twitter`: relay a post upstream
//! - `OPTIONS /api/twitter`: CORS preflight
//!
//! Every other method on the relay route answers 405 without calling upstream.

pub mod handlers;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use handlers::{
    health, method_not_allowed, preflight, relay_tweet, status, AppState, HealthResponse,
    RelayContext, RelayRequest, RelayResponse,
};

/// Path of the relay endpoint.
pub const RELAY_PATH: &str = "/api/twitter";

/// Permissive CORS so browser-hosted ticket apps can call the relay.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health))
        .route(
            RELAY_PATH,
            post(relay_tweet)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
