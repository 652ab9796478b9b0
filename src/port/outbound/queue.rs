//! Durable message queue port.
//!
//! Delivery is at-least-once. Attribute values are always strings.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Attribute naming the exchange a pending order was placed on.
pub const ATTR_EXCHANGE: &str = "Exchange";
/// Attribute carrying the transaction id, for queue-side inspection.
pub const ATTR_TRANSACTION_ID: &str = "TransactionId";
/// Attribute distinguishing real settlement work (`"true"`) from simulated
/// traffic (`"false"`).
pub const ATTR_REAL: &str = "Real";

/// A message to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub body: String,
    pub attributes: BTreeMap<String, String>,
}

/// A message received from the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub message_id: String,
    /// Handle used to acknowledge (delete) this delivery.
    pub receipt_handle: String,
    /// Queue the message was received from.
    pub source: String,
    pub body: String,
    pub attributes: BTreeMap<String, String>,
}

impl QueueMessage {
    /// Get a string attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Send, receive, and acknowledge queue messages.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Enqueue a message. Returns the queue-assigned message id.
    async fn send_message(&self, message: OutgoingMessage) -> Result<String>;

    /// Receive up to `max_messages` messages.
    async fn receive_messages(&self, max_messages: usize) -> Result<Vec<QueueMessage>>;

    /// Acknowledge a delivered message so it is not redelivered.
    async fn delete_message(&self, message: &QueueMessage) -> Result<()>;
}
