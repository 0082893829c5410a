//! OAuth 1.0a HMAC-SHA1 user-context request signing.

mod nonce;
mod signature;

pub use nonce::{FixedNonceSource, NonceSource, SystemNonceSource};
pub use signature::{
    build_authorization_header, percent_encode, sign, signature_base_string, signing_key,
    SignatureRequest, OAUTH_VERSION, SIGNATURE_METHOD,
};

use crate::error::SignError;

/// User-context OAuth 1.0a credentials.
#[derive(Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

impl OAuth1Credentials {
    /// Sign a request and return the `Authorization` header value.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `base_url` - URL without query string
    /// * `request_params` - Query or form parameters to include in the signature
    /// * `nonces` - Source of the fresh nonce and timestamp for this call
    pub fn authorization_header(
        &self,
        method: &str,
        base_url: &str,
        request_params: &[(String, String)],
        nonces: &dyn NonceSource,
    ) -> Result<String, SignError> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonces.nonce()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), nonces.timestamp().to_string()),
            ("oauth_token".to_string(), self.access_token.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];

        // Request parameters are signed but never sent in the header.
        let request = SignatureRequest {
            http_method: method.to_string(),
            target_url: base_url.to_string(),
            parameters: oauth_params
                .iter()
                .chain(request_params.iter())
                .cloned()
                .collect(),
            consumer_secret: self.consumer_secret.clone(),
            token_secret: self.access_token_secret.clone(),
        };

        let signature = sign(&request)?;
        oauth_params.push(("oauth_signature".to_string(), signature));

        Ok(build_authorization_header(&oauth_params))
    }
}
