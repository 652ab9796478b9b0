//! Builders for domain values used across tests.

use std::collections::BTreeMap;

use rust_decimal_macros::dec;

use crate::domain::{ArchiveLocation, DcaOrderSpec, Direction, PendingOrderRecord, SettledOrder, TransactionId};
use crate::port::outbound::queue::{ATTR_EXCHANGE, ATTR_REAL, ATTR_TRANSACTION_ID};
use crate::port::QueueMessage;

/// A market buy of `0.0001 BTCGBP` on `exchange`.
pub fn order_spec(exchange: &str, enabled: bool) -> DcaOrderSpec {
    DcaOrderSpec {
        exchange: exchange.to_string(),
        pair: "BTCGBP".to_string(),
        direction: Direction::Buy,
        order_kind: "market".to_string(),
        volume: dec!(0.0001),
        validate: false,
        enabled,
    }
}

/// A closed buy settlement for `transaction_id`.
pub fn settled_order(transaction_id: &str) -> SettledOrder {
    SettledOrder {
        transaction_id: TransactionId::new(transaction_id),
        exchange_status: "closed".to_string(),
        pair: "XBTGBP".to_string(),
        order_type: "market".to_string(),
        side: "buy".to_string(),
        price: dec!(100.23),
        fee: dec!(1.23),
        volume: dec!(20),
        open_time: 2_000_021_133.0,
        close_time: 2_000_021_133.0,
    }
}

/// A pending-order queue message as the executor would have sent it.
///
/// `exchange` of `None` leaves the attribute off entirely.
pub fn pending_message(
    message_id: &str,
    exchange: Option<&str>,
    real: &str,
    transaction_id: &str,
) -> QueueMessage {
    let record = PendingOrderRecord::new(
        TransactionId::new(transaction_id),
        ArchiveLocation::new(
            "bucket",
            format!("pending/exchange=kraken/{transaction_id}.json"),
        ),
    );

    let mut attributes = BTreeMap::new();
    if let Some(exchange) = exchange {
        attributes.insert(ATTR_EXCHANGE.to_string(), exchange.to_string());
    }
    attributes.insert(ATTR_TRANSACTION_ID.to_string(), transaction_id.to_string());
    attributes.insert(ATTR_REAL.to_string(), real.to_string());

    QueueMessage {
        message_id: message_id.to_string(),
        receipt_handle: format!("receipt-{message_id}"),
        source: "pending-orders".to_string(),
        body: serde_json::to_string(&record).unwrap_or_default(),
        attributes,
    }
}
