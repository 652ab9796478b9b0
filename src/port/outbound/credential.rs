//! Secret parameter store port.

use async_trait::async_trait;

use crate::error::Result;

/// Resolves named secrets such as exchange API keys.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch a parameter value.
    ///
    /// Callers always request decryption for secrets; stores holding only
    /// plain values may ignore the flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`](crate::error::Error::Credential) if the
    /// parameter is missing or cannot be read.
    async fn get_parameter(&self, path: &str, decrypt: bool) -> Result<String>;
}
