//! Configuration module for environment variable parsing.
//!
//! Read once at startup and handed to the web layer; handlers never touch the
//! environment themselves.

use std::env;

use tracing::warn;
use url::Url;

/// Default X/Twitter v2 endpoint for creating posts.
pub const DEFAULT_TWEET_ENDPOINT: &str = "https://api.twitter.com/2/tweets";

/// Application configuration loaded from environment variables.
#[derive(Clone, Default)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Absolute URL of the post-creation endpoint (no query string)
    pub tweet_endpoint: String,

    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    // =========================================================================
    // Credentials
    // =========================================================================
    /// OAuth 1.0a consumer key (`TWITTER_API_KEY`)
    pub api_key: Option<String>,

    /// OAuth 1.0a consumer secret (`TWITTER_API_SECRET`)
    pub api_secret: Option<String>,

    /// OAuth 1.0a access token (`TWITTER_ACCESS_TOKEN`)
    pub access_token: Option<String>,

    /// OAuth 1.0a access token secret (`TWITTER_ACCESS_TOKEN_SECRET`)
    pub access_token_secret: Option<String>,

    /// App-only bearer token (`TWITTER_BEARER_TOKEN`)
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("tweet_endpoint", &self.tweet_endpoint)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("oauth_configured", &self.oauth_configured())
            .field("bearer_configured", &self.bearer_token.is_some())
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            tweet_endpoint: parse_endpoint("TWITTER_API_URL", DEFAULT_TWEET_ENDPOINT),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            api_key: non_blank("TWITTER_API_KEY"),
            api_secret: non_blank("TWITTER_API_SECRET"),
            access_token: non_blank("TWITTER_ACCESS_TOKEN"),
            access_token_secret: non_blank("TWITTER_ACCESS_TOKEN_SECRET"),
            bearer_token: non_blank("TWITTER_BEARER_TOKEN"),
        }
    }

    /// True when any of the four OAuth 1.0a values is present.
    pub fn oauth_configured(&self) -> bool {
        self.api_key.is_some()
            || self.api_secret.is_some()
            || self.access_token.is_some()
            || self.access_token_secret.is_some()
    }
}

/// Read a variable, treating blank values as unset.
fn non_blank(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read an endpoint URL, falling back to `default` unless it is an absolute
/// http(s) URL without a query string.
fn parse_endpoint(name: &str, default: &str) -> String {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default.to_string(),
    };

    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.query().is_none() => {
            url.to_string()
        }
        _ => {
            warn!(env_var = name, value = %raw, "Invalid endpoint URL, using default");
            default.to_string()
        }
    }
}
