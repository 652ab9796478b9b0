//! Kraken exchange configuration.

use serde::Deserialize;

/// Kraken REST API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Credential store path of the API key.
    #[serde(default = "default_key_parameter")]
    pub key_parameter: String,
    /// Credential store path of the base64 API secret.
    #[serde(default = "default_secret_parameter")]
    pub secret_parameter: String,
}

fn default_api_url() -> String {
    "https://api.kraken.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_key_parameter() -> String {
    "/dca-manager/kraken/key".to_string()
}

fn default_secret_parameter() -> String {
    "/dca-manager/kraken/secret".to_string()
}

impl Default for KrakenConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            key_parameter: default_key_parameter(),
            secret_parameter: default_secret_parameter(),
        }
    }
}
