//! Hand-off of pending orders to the settlement queue.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::PendingOrderRecord;
use crate::error::Result;
use crate::port::outbound::queue::{ATTR_EXCHANGE, ATTR_REAL, ATTR_TRANSACTION_ID};
use crate::port::{MessageQueue, OutgoingMessage};

/// Publishes pending-order records for later reconciliation.
#[derive(Clone)]
pub struct PendingOrderSubmitter {
    queue: Arc<dyn MessageQueue>,
}

impl PendingOrderSubmitter {
    pub fn new(queue: Arc<dyn MessageQueue>) -> Self {
        Self { queue }
    }

    /// Build the queue message for a record.
    ///
    /// `Real` is `"false"` for simulated orders so the reconciler can drop
    /// them without touching an exchange.
    ///
    /// # Errors
    ///
    /// Fails if the record cannot be serialized.
    pub fn message(
        record: &PendingOrderRecord,
        exchange: &str,
        is_simulated: bool,
    ) -> Result<OutgoingMessage> {
        let mut attributes = BTreeMap::new();
        attributes.insert(ATTR_EXCHANGE.to_string(), exchange.to_string());
        attributes.insert(
            ATTR_TRANSACTION_ID.to_string(),
            record.transaction_id.to_string(),
        );
        attributes.insert(ATTR_REAL.to_string(), (!is_simulated).to_string());

        Ok(OutgoingMessage {
            body: serde_json::to_string(record)?,
            attributes,
        })
    }

    /// Enqueue a record. Returns the queue's message id.
    ///
    /// # Errors
    ///
    /// Fails on serialization or queue errors.
    pub async fn enqueue(
        &self,
        record: &PendingOrderRecord,
        exchange: &str,
        is_simulated: bool,
    ) -> Result<String> {
        let message = Self::message(record, exchange, is_simulated)?;
        let message_id = self.queue.send_message(message).await?;
        info!(
            transaction_id = %record.transaction_id,
            exchange,
            message_id = %message_id,
            real = !is_simulated,
            "Queued pending order"
        );
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArchiveLocation, TransactionId};
    use crate::testkit::doubles::RecordingQueue;
    use serde_json::json;

    fn record() -> PendingOrderRecord {
        PendingOrderRecord::new(
            TransactionId::new("TX1"),
            ArchiveLocation::new("bucket", "pending/exchange=kraken/TX1.json"),
        )
    }

    #[test]
    fn message_carries_record_and_attributes() {
        let message = PendingOrderSubmitter::message(&record(), "kraken", false).unwrap();

        let body: serde_json::Value = serde_json::from_str(&message.body).unwrap();
        assert_eq!(
            body,
            json!({
                "transaction_id": "TX1",
                "s3_bucket": "bucket",
                "s3_key": "pending/exchange=kraken/TX1.json",
            })
        );
        assert_eq!(message.attributes[ATTR_EXCHANGE], "kraken");
        assert_eq!(message.attributes[ATTR_TRANSACTION_ID], "TX1");
        assert_eq!(message.attributes[ATTR_REAL], "true");
    }

    #[test]
    fn simulated_orders_are_marked_not_real() {
        let message = PendingOrderSubmitter::message(&record(), "kraken", true).unwrap();
        assert_eq!(message.attributes[ATTR_REAL], "false");
    }

    #[tokio::test]
    async fn enqueue_sends_one_message() {
        let queue = Arc::new(RecordingQueue::new());
        let submitter = PendingOrderSubmitter::new(queue.clone());

        submitter.enqueue(&record(), "kraken", true).await.unwrap();

        let sent = queue.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].attributes[ATTR_REAL], "false");
    }
}
