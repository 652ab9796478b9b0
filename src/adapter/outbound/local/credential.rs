//! Environment-variable credential store.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::CredentialStore;

/// Reads parameters from environment variables.
///
/// A parameter path maps to a variable name by upper-casing it and replacing
/// every non-alphanumeric character with `_`, e.g. `/dca-manager/kraken/key`
/// becomes `DCA_MANAGER_KRAKEN_KEY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialStore;

impl EnvCredentialStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Environment variable holding the parameter at `path`.
    #[must_use]
    pub fn variable_name(path: &str) -> String {
        path.trim_start_matches('/')
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn get_parameter(&self, path: &str, _decrypt: bool) -> Result<String> {
        let variable = Self::variable_name(path);
        debug!(path, variable = %variable, "Resolving credential");

        match std::env::var(&variable) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            Ok(_) => Err(Error::Credential {
                path: path.to_string(),
                reason: format!("{variable} is empty"),
            }),
            Err(e) => Err(Error::Credential {
                path: path.to_string(),
                reason: format!("{variable}: {e}"),
            }),
        }
    }
}
