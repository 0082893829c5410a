//! Tweet relay - forwards ticket replies to the X/Twitter posting API.
//!
//! A caller (typically a support-ticket app) POSTs `{ "text": ... }` to the
//! relay, which authorizes one outbound `POST /2/tweets` with either an
//! OAuth 1.0a HMAC-SHA1 signature or a bearer token.
//!
//! ## Flow
//!
//! ```text
//! Caller → web (validate) → auth (OAuth 1.0a | Bearer) → upstream POST → response
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod oauth;
pub mod upstream;
pub mod web;

// Re-export commonly used types
pub use auth::{Authenticator, OAUTH_REQUIRED_VARS};
pub use config::Config;
pub use error::{RelayError, SignError};
pub use oauth::{sign, FixedNonceSource, NonceSource, SignatureRequest, SystemNonceSource};
pub use upstream::{PostedTweet, TweetClient};
pub use web::{router, AppState};
