//! Outbound client for the post-creation endpoint.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing;

use crate::error::RelayError;

/// Public permalink prefix for a created post.
pub const TWEET_URL_PREFIX: &str = "https://twitter.com/i/web/status/";

/// JSON body sent upstream.
#[derive(Debug, Serialize)]
struct CreateTweet<'a> {
    text: &'a str,
}

/// Success body: `{ "data": { "id": "..." } }`.
#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

/// A post accepted by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedTweet {
    pub id: String,
}

impl PostedTweet {
    pub fn url(&self) -> String {
        format!("{}{}", TWEET_URL_PREFIX, self.id)
    }
}

/// Issues exactly one POST per call; no retries.
#[derive(Clone)]
pub struct TweetClient {
    http: Client,
    endpoint: String,
}

impl TweetClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RelayError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post `text` with a prepared `Authorization` header value.
    pub async fn post_tweet(
        &self,
        authorization: &str,
        text: &str,
    ) -> Result<PostedTweet, RelayError> {
        tracing::info!(
            endpoint = %self.endpoint,
            text_length = text.len(),
            "upstream_post_starting"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, authorization)
            .json(&CreateTweet { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!(endpoint = %self.endpoint, error = %e, "upstream_post_timeout");
                } else {
                    tracing::error!(endpoint = %self.endpoint, error = %e, "upstream_post_error");
                }
                RelayError::Http(e)
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        let details: Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                status_code = status.as_u16(),
                body_length = body.len(),
                error = %e,
                "upstream_response_not_json"
            );
            RelayError::Transport(format!("response body is not JSON: {}", e))
        })?;

        if !status.is_success() {
            tracing::warn!(
                status_code = status.as_u16(),
                details = %details,
                "upstream_rejected"
            );
            return Err(RelayError::UpstreamRejection {
                status: status.as_u16(),
                details,
            });
        }

        let created: CreateTweetResponse = serde_json::from_value(details)
            .map_err(|e| RelayError::Transport(format!("missing data.id: {}", e)))?;

        tracing::info!(
            status_code = status.as_u16(),
            tweet_id = %created.data.id,
            "upstream_post_complete"
        );

        Ok(PostedTweet {
            id: created.data.id,
        })
    }
}
