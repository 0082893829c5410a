//! Tweet relay web server.
//!
//! Receives relay requests from ticketing tools and posts them to the
//! X/Twitter API, one outbound call per inbound request.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{router, AppState, Authenticator, Config, TweetClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_server_starting");

    // Load configuration
    let config = Config::from_env();
    let auth_mode = Authenticator::from_config(&config)
        .map(|a| a.mode())
        .unwrap_or("unconfigured");
    info!(
        port = config.port,
        tweet_endpoint = %config.tweet_endpoint,
        request_timeout_ms = config.request_timeout_ms,
        oauth_configured = config.oauth_configured(),
        bearer_configured = config.bearer_token.is_some(),
        auth_mode,
        "config_loaded"
    );
    if auth_mode == "unconfigured" {
        tracing::warn!("relay_credentials_not_configured");
    }

    let client = TweetClient::new(
        &config.tweet_endpoint,
        Duration::from_millis(config.request_timeout_ms),
    )
    .context("Failed to build HTTP client")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, client));

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_server_shutting_down");
}
