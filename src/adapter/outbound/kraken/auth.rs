//! Kraken private-endpoint request signing.
//!
//! `API-Sign` is `base64(HMAC-SHA512(base64decode(secret), path ++
//! SHA256(nonce ++ postdata)))`. Nonces must strictly increase per key.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ExchangeError;

type HmacSha512 = Hmac<Sha512>;

/// API key pair for Kraken private endpoints.
#[derive(Clone)]
pub struct KrakenCredentials {
    api_key: String,
    secret: String,
}

impl KrakenCredentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a private request.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::AuthFailed`] if the secret is not valid base64.
    pub fn sign(&self, path: &str, nonce: u64, postdata: &str) -> Result<String, ExchangeError> {
        let secret = BASE64
            .decode(self.secret.trim())
            .map_err(|e| ExchangeError::AuthFailed(format!("invalid secret encoding: {e}")))?;

        let mut sha = Sha256::new();
        sha.update(nonce.to_string().as_bytes());
        sha.update(postdata.as_bytes());
        let digest = sha.finalize();

        let mut mac = HmacSha512::new_from_slice(&secret)
            .map_err(|e| ExchangeError::AuthFailed(format!("HMAC init failed: {e}")))?;
        mac.update(path.as_bytes());
        mac.update(&digest);

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for KrakenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KrakenCredentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Strictly increasing millisecond nonce.
#[derive(Debug, Default)]
pub struct NonceSource {
    last: AtomicU64,
}

impl NonceSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce: the current time in milliseconds, bumped past the last
    /// issued value when the clock has not advanced.
    pub fn next(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let mut issued = now;
        let _ = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = now.max(last + 1);
                Some(issued)
            });
        issued
    }
}
