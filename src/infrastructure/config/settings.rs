//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all pipeline settings.
//! Configuration is loaded from a TOML file; the deployment environment
//! variables (`DCA_BUCKET`, `DCA_ALLOW_REAL`, ...) override file values.
//!
//! # Example
//!
//! ```no_run
//! use dca_pipeline::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("dca.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::logging::LoggingConfig;
use super::pipeline::{ArchiveConfig, JobConfig, QueueConfig, WRITE_OPERATIONS};
use crate::adapter::outbound::kraken::settings::KrakenConfig;
use crate::application::{ExecutorSettings, ReconcilerSettings};
use crate::domain::ArchiveLocation;
use crate::error::{ConfigError, Result};

/// Bucket holding configuration and archives.
pub const ENV_BUCKET: &str = "DCA_BUCKET";
/// Key of the order configuration document.
pub const ENV_CONFIG: &str = "DCA_CONFIG";
/// Any non-empty value allows real orders.
pub const ENV_ALLOW_REAL: &str = "DCA_ALLOW_REAL";
pub const ENV_PENDING_ORDERS_QUEUE_URL: &str = "DCA_PENDING_ORDERS_QUEUE_URL";
pub const ENV_PENDING_ORDER_PREFIX: &str = "DCA_PENDING_ORDER_S3_PREFIX";
pub const ENV_PROCESSED_ORDER_PREFIX: &str = "DCA_PROCESSED_ORDER_S3_PREFIX";
pub const ENV_JOB_NAME: &str = "DCA_GLUE_PROCESS_TRANSACTION_JOB";
pub const ENV_JOB_WRITE_OPERATION: &str = "DCA_GLUE_PROCESS_TRANSACTION_OPERATION";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Simulate orders instead of trading. Defaults to true; real trading
    /// must be switched on explicitly.
    #[serde(default = "default_simulate")]
    pub simulate: bool,

    /// Abort an invocation that runs longer than this many seconds.
    #[serde(default)]
    pub deadline_secs: Option<u64>,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default)]
    pub job: JobConfig,

    #[serde(default)]
    pub kraken: KrakenConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

const fn default_simulate() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulate: default_simulate(),
            deadline_secs: None,
            archive: ArchiveConfig::default(),
            queue: QueueConfig::default(),
            job: JobConfig::default(),
            kraken: KrakenConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |name| std::env::var(name).ok())
    }

    /// Like [`Config::parse_toml`] with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| env(name).filter(|value| !value.is_empty());

        if let Some(bucket) = set(ENV_BUCKET) {
            self.archive.bucket = bucket;
        }
        if let Some(key) = set(ENV_CONFIG) {
            self.archive.config_key = key;
        }
        if set(ENV_ALLOW_REAL).is_some() {
            self.simulate = false;
        }
        if let Some(url) = set(ENV_PENDING_ORDERS_QUEUE_URL) {
            self.queue.url = url;
        }
        if let Some(prefix) = set(ENV_PENDING_ORDER_PREFIX) {
            self.archive.pending_prefix = prefix;
        }
        if let Some(prefix) = set(ENV_PROCESSED_ORDER_PREFIX) {
            self.archive.processed_prefix = prefix;
        }
        if let Some(name) = set(ENV_JOB_NAME) {
            self.job.name = name;
        }
        if let Some(operation) = set(ENV_JOB_WRITE_OPERATION) {
            self.job.write_operation = operation;
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("bucket", &self.archive.bucket),
            ("config_key", &self.archive.config_key),
            ("pending_prefix", &self.archive.pending_prefix),
            ("processed_prefix", &self.archive.processed_prefix),
            ("input_uri_scheme", &self.archive.input_uri_scheme),
            ("queue_url", &self.queue.url),
            ("job_name", &self.job.name),
            ("api_url", &self.kraken.api_url),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }

        if !WRITE_OPERATIONS.contains(&self.job.write_operation.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "write_operation",
                reason: format!(
                    "'{}' is not one of {}",
                    self.job.write_operation,
                    WRITE_OPERATIONS.join(", ")
                ),
            }
            .into());
        }
        if !(1..=10).contains(&self.queue.receive_batch_size) {
            return Err(ConfigError::InvalidValue {
                field: "receive_batch_size",
                reason: "must be between 1 and 10".to_string(),
            }
            .into());
        }
        if self.kraken.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.kraken.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.deadline_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "deadline_secs",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Location of the order configuration document.
    #[must_use]
    pub fn order_document(&self) -> ArchiveLocation {
        ArchiveLocation::new(self.archive.bucket.clone(), self.archive.config_key.clone())
    }

    #[must_use]
    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            bucket: self.archive.bucket.clone(),
            pending_prefix: self.archive.pending_prefix.clone(),
        }
    }

    #[must_use]
    pub fn reconciler_settings(&self) -> ReconcilerSettings {
        ReconcilerSettings {
            bucket: self.archive.bucket.clone(),
            processed_prefix: self.archive.processed_prefix.clone(),
            job_name: self.job.name.clone(),
            write_operation: self.job.write_operation.clone(),
            input_uri_scheme: self.archive.input_uri_scheme.clone(),
            receive_batch_size: self.queue.receive_batch_size,
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
