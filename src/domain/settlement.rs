//! Canonical, exchange-agnostic settlement records.

use serde::{Deserialize, Serialize};

use super::id::TransactionId;
use super::money::{Price, Volume};

/// A settled (or settling) order as reported by an exchange.
///
/// This is the analytics-facing shape: every exchange adapter maps its own
/// query response into it. Amounts are exact decimals and serialize as
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettledOrder {
    pub transaction_id: TransactionId,
    /// Status string as reported by the exchange (e.g. `closed`, `open`).
    pub exchange_status: String,
    pub pair: String,
    /// Order kind (e.g. `market`).
    pub order_type: String,
    /// Side (`buy` / `sell`).
    #[serde(rename = "type")]
    pub side: String,
    pub price: Price,
    pub fee: Price,
    /// Executed volume.
    pub volume: Volume,
    /// Epoch seconds, fractional.
    pub open_time: f64,
    /// Epoch seconds, fractional. Zero while the order is still open.
    pub close_time: f64,
}

impl SettledOrder {
    /// Placeholder entries returned by an exchange carry no transaction id.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.transaction_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn serializes_amounts_as_strings() {
        let order = SettledOrder {
            transaction_id: TransactionId::new("TX1"),
            exchange_status: "closed".into(),
            pair: "XBTGBP".into(),
            order_type: "market".into(),
            side: "buy".into(),
            price: dec!(100.23),
            fee: dec!(1.23),
            volume: dec!(0.5),
            open_time: 1_688_666_559.8974,
            close_time: 1_688_666_559.9011,
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], json!("buy"));
        assert_eq!(value["price"], json!("100.23"));
        assert_eq!(value["fee"], json!("1.23"));
        assert_eq!(value["volume"], json!("0.5"));
        assert_eq!(value["transaction_id"], json!("TX1"));
        assert!(!order.is_placeholder());
    }
}
