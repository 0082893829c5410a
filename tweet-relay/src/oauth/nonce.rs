//! Nonce and timestamp sources for signed requests.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Supplies the per-call `oauth_nonce` and `oauth_timestamp`.
///
/// Every signed request needs a fresh pair: the receiving API rejects a
/// repeated nonce/timestamp combination as a replay.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> String;

    /// Unix time in seconds.
    fn timestamp(&self) -> u64;
}

/// Thread RNG nonce (16 bytes, 32 hex characters) and wall-clock timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNonceSource;

impl NonceSource for SystemNonceSource {
    fn nonce(&self) -> String {
        let bytes: [u8; 16] = rand::thread_rng().gen();
        hex::encode(bytes)
    }

    fn timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Pinned nonce and timestamp, for reproducible signatures.
#[derive(Debug, Clone)]
pub struct FixedNonceSource {
    pub nonce: String,
    pub timestamp: u64,
}

impl FixedNonceSource {
    pub fn new(nonce: &str, timestamp: u64) -> Self {
        Self {
            nonce: nonce.to_string(),
            timestamp,
        }
    }
}

impl NonceSource for FixedNonceSource {
    fn nonce(&self) -> String {
        self.nonce.clone()
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
