//! Kraken REST API client.
//!
//! Only the two private endpoints the pipeline needs are wrapped:
//! `AddOrder` and `QueryOrders`. Requests are form-encoded and signed with
//! the account's API secret.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::auth::{KrakenCredentials, NonceSource};
use super::dto::{AddOrderRequest, KrakenEnvelope, KrakenOrder};
use super::settings::KrakenConfig;
use crate::error::{ExchangeError, Result};

/// Access to the Kraken private API.
///
/// Split from the orderer so order mapping can be tested without a network.
#[async_trait]
pub trait KrakenApi: Send + Sync {
    /// Place an order. Returns the raw `result` object.
    async fn add_order(&self, request: &AddOrderRequest) -> Result<Value>;

    /// Query orders by comma-separated transaction ids.
    async fn query_orders(&self, txids: &str) -> Result<HashMap<String, KrakenOrder>>;
}

/// HTTP client for the Kraken REST API.
pub struct KrakenClient {
    http: HttpClient,
    base_url: String,
    credentials: KrakenCredentials,
    nonces: NonceSource,
}

impl KrakenClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: KrakenCredentials) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            nonces: NonceSource::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &KrakenConfig, credentials: KrakenCredentials) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            credentials,
            nonces: NonceSource::new(),
        }
    }

    fn encode_form(nonce: u64, fields: &[(&str, String)]) -> String {
        let mut form = url::form_urlencoded::Serializer::new(String::new());
        form.append_pair("nonce", &nonce.to_string());
        for (name, value) in fields {
            form.append_pair(name, value);
        }
        form.finish()
    }

    async fn private_request<T>(&self, method: &str, fields: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = format!("/0/private/{method}");
        let nonce = self.nonces.next();
        let postdata = Self::encode_form(nonce, fields);
        let signature = self.credentials.sign(&path, nonce, &postdata)?;

        debug!(method, nonce, "Sending Kraken private request");

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header("API-Key", self.credentials.api_key())
            .header("API-Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(postdata)
            .send()
            .await
            .map_err(ExchangeError::from)?
            .error_for_status()
            .map_err(ExchangeError::from)?;

        let envelope: KrakenEnvelope<T> = response.json().await.map_err(ExchangeError::from)?;
        if !envelope.error.is_empty() {
            return Err(ExchangeError::Api(envelope.error).into());
        }

        envelope
            .result
            .ok_or_else(|| ExchangeError::Api(vec![format!("{method} returned no result")]).into())
    }
}

#[async_trait]
impl KrakenApi for KrakenClient {
    async fn add_order(&self, request: &AddOrderRequest) -> Result<Value> {
        self.private_request("AddOrder", &request.form_fields()).await
    }

    async fn query_orders(&self, txids: &str) -> Result<HashMap<String, KrakenOrder>> {
        let fields = [("txid", txids.to_string()), ("trades", "false".to_string())];
        self.private_request("QueryOrders", &fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_starts_with_nonce() {
        let body = KrakenClient::encode_form(
            1_616_492_376_594,
            &[("pair", "XBTUSD".to_string()), ("volume", "1.25".to_string())],
        );
        assert_eq!(body, "nonce=1616492376594&pair=XBTUSD&volume=1.25");
    }

    #[test]
    fn form_body_escapes_commas_in_txid_lists() {
        let body = KrakenClient::encode_form(1, &[("txid", "A,B".to_string())]);
        assert_eq!(body, "nonce=1&txid=A%2CB");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = KrakenClient::new("https://api.kraken.com/", KrakenCredentials::new("k", "cw=="));
        assert_eq!(client.base_url, "https://api.kraken.com");
    }
}
