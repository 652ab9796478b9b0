//! Storage, queue and downstream job settings.

use std::path::PathBuf;

use serde::Deserialize;

/// Write operations the ingestion job accepts.
pub const WRITE_OPERATIONS: [&str; 4] = ["insert", "upsert", "bulk_insert", "delete"];

/// Archive storage settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Local directory standing in for object storage.
    #[serde(default = "default_archive_root")]
    pub root: PathBuf,
    /// Bucket holding configuration and archived orders.
    #[serde(default)]
    pub bucket: String,
    /// Key of the order configuration document.
    #[serde(default = "default_config_key")]
    pub config_key: String,
    /// Key prefix for submitted orders awaiting settlement.
    #[serde(default = "default_pending_prefix")]
    pub pending_prefix: String,
    /// Key prefix for settled orders.
    #[serde(default = "default_processed_prefix")]
    pub processed_prefix: String,
    /// Scheme used when handing archive objects to the ingestion job.
    #[serde(default = "default_input_uri_scheme")]
    pub input_uri_scheme: String,
}

fn default_archive_root() -> PathBuf {
    PathBuf::from("var/archive")
}

fn default_config_key() -> String {
    "config/dca.json".into()
}

fn default_pending_prefix() -> String {
    "transactions/pending".into()
}

fn default_processed_prefix() -> String {
    "transactions/processed".into()
}

fn default_input_uri_scheme() -> String {
    "s3a".into()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: default_archive_root(),
            bucket: String::new(),
            config_key: default_config_key(),
            pending_prefix: default_pending_prefix(),
            processed_prefix: default_processed_prefix(),
            input_uri_scheme: default_input_uri_scheme(),
        }
    }
}

/// Pending-order queue settings.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Queue identifier reported as the message source.
    #[serde(default = "default_queue_url")]
    pub url: String,
    /// Directory holding spooled messages.
    #[serde(default = "default_spool_dir")]
    pub spool_dir: PathBuf,
    /// Messages taken per reconciliation pass (1 to 10).
    #[serde(default = "default_receive_batch_size")]
    pub receive_batch_size: usize,
}

fn default_queue_url() -> String {
    "local://pending-orders".into()
}

fn default_spool_dir() -> PathBuf {
    PathBuf::from("var/queue/pending-orders")
}

const fn default_receive_batch_size() -> usize {
    10
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            url: default_queue_url(),
            spool_dir: default_spool_dir(),
            receive_batch_size: default_receive_batch_size(),
        }
    }
}

/// Downstream ingestion job settings.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub name: String,
    /// One of [`WRITE_OPERATIONS`].
    #[serde(default = "default_write_operation")]
    pub write_operation: String,
    /// Program started for each job run. Runs are only logged when unset.
    #[serde(default)]
    pub command: Option<String>,
}

fn default_write_operation() -> String {
    "upsert".into()
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            write_operation: default_write_operation(),
            command: None,
        }
    }
}
