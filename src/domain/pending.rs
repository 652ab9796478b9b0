//! Pending-order hand-off records and archive addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::TransactionId;

/// Location of an object in archival storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveLocation {
    pub bucket: String,
    pub key: String,
}

impl ArchiveLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Archive key for a transaction, partitioned by exchange.
    ///
    /// Downstream ingestion keys off the `exchange=` segment, so the exchange
    /// name is always lower-cased.
    #[must_use]
    pub fn transaction_key(prefix: &str, exchange: &str, transaction_id: &TransactionId) -> String {
        format!(
            "{}/exchange={}/{}.json",
            prefix,
            exchange.to_lowercase(),
            transaction_id
        )
    }

    /// Fully qualified URI of the object, e.g. `s3a://bucket/key`.
    #[must_use]
    pub fn uri(&self, scheme: &str) -> String {
        format!("{}://{}/{}", scheme, self.bucket, self.key)
    }
}

impl fmt::Display for ArchiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// A submitted order waiting for settlement.
///
/// Points at the archived submission so the reconciler can find the raw
/// exchange response later. Field names on the wire match the messages
/// already sitting in deployed queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrderRecord {
    pub transaction_id: TransactionId,
    #[serde(rename = "s3_bucket")]
    pub bucket: String,
    #[serde(rename = "s3_key")]
    pub key: String,
}

impl PendingOrderRecord {
    pub fn new(transaction_id: TransactionId, location: ArchiveLocation) -> Self {
        Self {
            transaction_id,
            bucket: location.bucket,
            key: location.key,
        }
    }

    #[must_use]
    pub fn location(&self) -> ArchiveLocation {
        ArchiveLocation::new(self.bucket.clone(), self.key.clone())
    }
}
