//! OAuth 1.0a HMAC-SHA1 signature generation (RFC 5849 Section 3.4).
//!
//! Everything in this module is pure computation: no clock, no RNG, no I/O.
//! Callers supply the nonce and timestamp as ordinary parameters.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

use crate::error::SignError;

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method` for this signer.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986 (space becomes `%20`, never `+`).
pub fn percent_encode(input: &str) -> String {
    percent_encoding::percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Inputs of a single signature computation.
#[derive(Debug, Clone, Default)]
pub struct SignatureRequest {
    /// HTTP method, case-insensitive.
    pub http_method: String,
    /// Absolute URL without query string.
    pub target_url: String,
    /// Protocol and request parameters, in any order.
    pub parameters: Vec<(String, String)>,
    pub consumer_secret: String,
    /// Empty for request-token or app-only contexts.
    pub token_secret: String,
}

impl SignatureRequest {
    pub fn new(http_method: &str, target_url: &str) -> Self {
        Self {
            http_method: http_method.to_string(),
            target_url: target_url.to_string(),
            ..Default::default()
        }
    }

    /// Add a parameter to the signed set.
    pub fn parameter(mut self, key: &str, value: &str) -> Self {
        self.parameters.push((key.to_string(), value.to_string()));
        self
    }

    pub fn secrets(mut self, consumer_secret: &str, token_secret: &str) -> Self {
        self.consumer_secret = consumer_secret.to_string();
        self.token_secret = token_secret.to_string();
        self
    }
}

/// Encode every pair, then sort by encoded key and encoded value.
fn normalize_parameters(params: &[(String, String)]) -> Vec<(String, String)> {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    encoded
}

/// Build the signature base string per RFC 5849 Section 3.4.1.
///
/// Format: `HTTP_METHOD&encoded_base_url&encoded_parameters`
pub fn signature_base_string(
    method: &str,
    base_url: &str,
    params: &[(String, String)],
) -> String {
    let param_string = normalize_parameters(params)
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&param_string)
    )
}

/// Build the HMAC key: `encoded_consumer_secret&encoded_token_secret`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Compute the base64-encoded HMAC-SHA1 signature of a request.
///
/// Fails only when the method, target URL or consumer secret is empty.
pub fn sign(request: &SignatureRequest) -> Result<String, SignError> {
    if request.http_method.is_empty() {
        return Err(SignError::InvalidInput("http_method"));
    }
    if request.target_url.is_empty() {
        return Err(SignError::InvalidInput("target_url"));
    }
    if request.consumer_secret.is_empty() {
        return Err(SignError::InvalidInput("consumer_secret"));
    }

    let base_string = signature_base_string(
        &request.http_method,
        &request.target_url,
        &request.parameters,
    );
    let key = signing_key(&request.consumer_secret, &request.token_secret);

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|_| SignError::InvalidInput("signing_key"))?;
    mac.update(base_string.as_bytes());

    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization` header value from the full parameter set,
/// `oauth_signature` included.
pub fn build_authorization_header(params: &[(String, String)]) -> String {
    let header_parts: Vec<String> = normalize_parameters(params)
        .into_iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect();
    format!("OAuth {}", header_parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
    const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
    const TWEETS_URL: &str = "https://api.twitter.com/2/tweets";

    fn oauth_params() -> Vec<(String, String)> {
        [
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            (
                "oauth_token",
                "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
            ),
            ("oauth_version", "1.0"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn tweets_request() -> SignatureRequest {
        SignatureRequest {
            http_method: "POST".to_string(),
            target_url: TWEETS_URL.to_string(),
            parameters: oauth_params(),
            consumer_secret: CONSUMER_SECRET.to_string(),
            token_secret: TOKEN_SECRET.to_string(),
        }
    }

    /// Replace the character at `index` with one that differs even after uppercasing.
    fn perturb(input: &str, index: usize) -> String {
        input
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i != index {
                    c
                } else if c.eq_ignore_ascii_case(&'x') {
                    'y'
                } else {
                    'x'
                }
            })
            .collect()
    }

    #[test]
    fn test_percent_encode_unreserved() {
        assert_eq!(percent_encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(percent_encode("-._~"), "-._~");
    }

    #[test]
    fn test_percent_encode_reserved() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("&="), "%26%3D");
        assert_eq!(percent_encode("/"), "%2F");
        assert_eq!(percent_encode("!*'()"), "%21%2A%27%28%29");
        assert_eq!(percent_encode("☃"), "%E2%98%83");
    }

    #[test]
    fn test_known_answer_twitter_docs_vector() {
        // Published X/Twitter "Creating a signature" example.
        let request = SignatureRequest {
            http_method: "post".to_string(),
            target_url: "https://api.twitter.com/1.1/statuses/update.json".to_string(),
            parameters: oauth_params(),
            consumer_secret: CONSUMER_SECRET.to_string(),
            token_secret: TOKEN_SECRET.to_string(),
        }
        .parameter("status", "Hello Ladies + Gentlemen, a signed OAuth request!")
        .parameter("include_entities", "true");

        assert_eq!(sign(&request).unwrap(), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
    }

    #[test]
    fn test_known_answer_tweets_endpoint() {
        let request = tweets_request();

        assert_eq!(
            signature_base_string(&request.http_method, TWEETS_URL, &request.parameters),
            "POST&https%3A%2F%2Fapi.twitter.com%2F2%2Ftweets&oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog\
             %26oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26oauth_signature_method%3DHMAC-SHA1\
             %26oauth_timestamp%3D1318622958%26oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\
             %26oauth_version%3D1.0"
        );
        assert_eq!(sign(&request).unwrap(), "KW/bTR/89oblzvjn7CwP2L8j5qQ=");
    }

    #[test]
    fn test_sign_is_deterministic() {
        let request = tweets_request();
        assert_eq!(sign(&request).unwrap(), sign(&request.clone()).unwrap());
    }

    #[test]
    fn test_sign_ignores_parameter_order() {
        let request = tweets_request();
        let mut reversed = request.clone();
        reversed.parameters.reverse();
        let mut rotated = request.clone();
        rotated.parameters.rotate_left(2);

        let expected = sign(&request).unwrap();
        assert_eq!(sign(&reversed).unwrap(), expected);
        assert_eq!(sign(&rotated).unwrap(), expected);
    }

    #[test]
    fn test_sign_method_is_case_insensitive() {
        let mut lower = tweets_request();
        lower.http_method = "post".to_string();
        assert_eq!(sign(&lower).unwrap(), sign(&tweets_request()).unwrap());
    }

    #[test]
    fn test_sign_sorts_duplicate_keys_by_value() {
        let a = SignatureRequest::new("GET", "https://example.com/")
            .secrets("cs", "ts")
            .parameter("a", "2")
            .parameter("a", "1");
        let b = SignatureRequest::new("GET", "https://example.com/")
            .secrets("cs", "ts")
            .parameter("a", "1")
            .parameter("a", "2");

        assert_eq!(
            signature_base_string("GET", "https://example.com/", &a.parameters),
            "GET&https%3A%2F%2Fexample.com%2F&a%3D1%26a%3D2"
        );
        assert_eq!(sign(&a).unwrap(), sign(&b).unwrap());
    }

    #[test]
    fn test_sign_is_sensitive_to_every_character() {
        let base = tweets_request();
        let expected = sign(&base).unwrap();

        for i in 0..base.http_method.len() {
            let mut changed = base.clone();
            changed.http_method = perturb(&base.http_method, i);
            assert_ne!(sign(&changed).unwrap(), expected, "method index {i}");
        }
        for i in 0..base.target_url.chars().count() {
            let mut changed = base.clone();
            changed.target_url = perturb(&base.target_url, i);
            assert_ne!(sign(&changed).unwrap(), expected, "url index {i}");
        }
        for i in 0..base.consumer_secret.chars().count() {
            let mut changed = base.clone();
            changed.consumer_secret = perturb(&base.consumer_secret, i);
            assert_ne!(sign(&changed).unwrap(), expected, "consumer secret index {i}");
        }
        for i in 0..base.token_secret.chars().count() {
            let mut changed = base.clone();
            changed.token_secret = perturb(&base.token_secret, i);
            assert_ne!(sign(&changed).unwrap(), expected, "token secret index {i}");
        }
        for (p, (key, value)) in base.parameters.iter().enumerate() {
            for i in 0..value.chars().count() {
                let mut changed = base.clone();
                changed.parameters[p].1 = perturb(value, i);
                assert_ne!(sign(&changed).unwrap(), expected, "{key} index {i}");
            }
        }
    }

    #[test]
    fn test_empty_token_secret() {
        assert_eq!(signing_key(CONSUMER_SECRET, ""), format!("{CONSUMER_SECRET}&"));
        assert_eq!(signing_key("a b", "c&d"), "a%20b&c%26d");

        let mut app_only = tweets_request();
        app_only.token_secret = String::new();
        let signature = sign(&app_only).unwrap();

        assert_eq!(signature, "1cgk5fwVlAT1Ksq/3EmgTwpuKYA=");
        assert_ne!(signature, sign(&tweets_request()).unwrap());
    }

    #[test]
    fn test_sign_rejects_empty_inputs() {
        let mut request = tweets_request();
        request.http_method.clear();
        assert!(matches!(
            sign(&request),
            Err(SignError::InvalidInput("http_method"))
        ));

        let mut request = tweets_request();
        request.target_url.clear();
        assert!(matches!(
            sign(&request),
            Err(SignError::InvalidInput("target_url"))
        ));

        let mut request = tweets_request();
        request.consumer_secret.clear();
        assert!(matches!(
            sign(&request),
            Err(SignError::InvalidInput("consumer_secret"))
        ));
    }

    #[test]
    fn test_parameter_string_round_trip() {
        let original: Vec<(String, String)> = [
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("q", "a=b&c=d"),
            ("emoji", "café ☕"),
            ("literal", "100%20 real"),
            ("tilde~key", "-._~"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut decoded: Vec<(String, String)> = normalize_parameters(&original)
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (
                    percent_decode_str(k).decode_utf8().unwrap().into_owned(),
                    percent_decode_str(v).decode_utf8().unwrap().into_owned(),
                )
            })
            .collect();

        let mut expected = original.clone();
        expected.sort();
        decoded.sort();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_build_authorization_header() {
        let mut params = oauth_params();
        params.push(("oauth_signature".to_string(), "KW/bTR/89oblzvjn7CwP2L8j5qQ=".to_string()));

        let header = build_authorization_header(&params);

        assert!(header.starts_with("OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", "));
        assert!(header.contains("oauth_signature=\"KW%2FbTR%2F89oblzvjn7CwP2L8j5qQ%3D\""));
        assert!(header.ends_with("oauth_version=\"1.0\""));
        assert_eq!(header.matches("=\"").count(), 7);
    }
}
