//! Outbound authentication: OAuth 1.0a user context or a static bearer token.

use crate::config::Config;
use crate::error::RelayError;
use crate::oauth::{NonceSource, OAuth1Credentials};

/// Environment variables required for OAuth 1.0a mode.
pub const OAUTH_REQUIRED_VARS: [&str; 4] = [
    "TWITTER_API_KEY",
    "TWITTER_API_SECRET",
    "TWITTER_ACCESS_TOKEN",
    "TWITTER_ACCESS_TOKEN_SECRET",
];

/// How outbound requests are authorized.
#[derive(Clone)]
pub enum Authenticator {
    /// Per-request HMAC-SHA1 signature.
    OAuth1(OAuth1Credentials),
    /// Static token sent verbatim.
    Bearer(String),
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Authenticator::OAuth1(credentials) => f.debug_tuple("OAuth1").field(credentials).finish(),
            Authenticator::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

impl Authenticator {
    /// Select the mode from configured credentials.
    ///
    /// Any OAuth 1.0a value selects OAuth mode, which then needs all four.
    /// Without OAuth values a bearer token is used if present.
    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        if config.oauth_configured() {
            return match (
                &config.api_key,
                &config.api_secret,
                &config.access_token,
                &config.access_token_secret,
            ) {
                (
                    Some(consumer_key),
                    Some(consumer_secret),
                    Some(access_token),
                    Some(access_token_secret),
                ) => Ok(Authenticator::OAuth1(OAuth1Credentials {
                    consumer_key: consumer_key.clone(),
                    consumer_secret: consumer_secret.clone(),
                    access_token: access_token.clone(),
                    access_token_secret: access_token_secret.clone(),
                })),
                _ => Err(RelayError::MissingCredentials {
                    required: OAUTH_REQUIRED_VARS.to_vec(),
                }),
            };
        }

        match &config.bearer_token {
            Some(token) => Ok(Authenticator::Bearer(token.clone())),
            None => Err(RelayError::MissingCredentials {
                required: OAUTH_REQUIRED_VARS.to_vec(),
            }),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Authenticator::OAuth1(_) => "oauth1",
            Authenticator::Bearer(_) => "bearer",
        }
    }

    /// Build the `Authorization` header value for one outbound call.
    ///
    /// The JSON body is not part of an OAuth 1.0a signature, so only the
    /// protocol parameters are signed.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        nonces: &dyn NonceSource,
    ) -> Result<String, RelayError> {
        match self {
            Authenticator::OAuth1(credentials) => {
                Ok(credentials.authorization_header(method, url, &[], nonces)?)
            }
            Authenticator::Bearer(token) => Ok(format!("Bearer {}", token)),
        }
    }
}
