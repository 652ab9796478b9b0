//! Simulated orderer used when real trading is not allowed.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{DcaOrderSpec, SettledOrder, SubmitOutcome, SubmittedOrder, TransactionId};
use crate::error::Result;
use crate::port::Orderer;

/// Transaction id attached to every simulated order.
pub const SIMULATED_TRANSACTION_ID: &str = "OEBG2U-KIRAN-4U6WHJ";

/// Submission timestamp attached to every simulated order.
pub const SIMULATED_TIMESTAMP: i64 = 12_345_678;

/// Returns the same synthetic submission for every enabled order and never
/// touches an exchange.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedOrderer;

impl SimulatedOrderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Orderer for SimulatedOrderer {
    async fn submit_order(&self, spec: &DcaOrderSpec) -> Result<SubmitOutcome> {
        if !spec.enabled {
            warn!(pair = %spec.pair, "Order disabled, skipping");
            return Ok(SubmitOutcome::Skipped);
        }

        warn!(
            exchange = %spec.exchange,
            pair = %spec.pair,
            direction = %spec.direction,
            volume = %spec.volume,
            "Simulating order, nothing is sent to the exchange"
        );

        let result = json!({
            "descr": {
                "order": format!("{} {} {} @ {}", spec.direction, spec.volume, spec.pair, spec.order_kind),
            },
            "txid": [SIMULATED_TRANSACTION_ID],
        });
        let order = SubmittedOrder::try_new(SIMULATED_TRANSACTION_ID, SIMULATED_TIMESTAMP, result)?;
        Ok(SubmitOutcome::Submitted(order))
    }

    async fn query_orders(&self, transaction_ids: &[TransactionId]) -> Result<Vec<SettledOrder>> {
        info!(count = transaction_ids.len(), "Simulated orderer has no settlements to report");
        Ok(Vec::new())
    }

    fn exchange_name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use rust_decimal_macros::dec;

    fn spec(enabled: bool) -> DcaOrderSpec {
        DcaOrderSpec {
            exchange: "kraken".into(),
            pair: "BTCGBP".into(),
            direction: Direction::Buy,
            order_kind: "market".into(),
            volume: dec!(0.0001),
            validate: false,
            enabled,
        }
    }

    #[tokio::test]
    async fn enabled_order_gets_fixed_transaction() {
        let order = SimulatedOrderer::new()
            .submit_order(&spec(true))
            .await
            .unwrap()
            .into_submitted()
            .unwrap();

        assert_eq!(order.transaction_id().as_str(), SIMULATED_TRANSACTION_ID);
        assert_eq!(order.timestamp(), SIMULATED_TIMESTAMP);
        assert_eq!(order.result()["txid"][0], SIMULATED_TRANSACTION_ID);
    }

    #[tokio::test]
    async fn disabled_order_is_skipped() {
        let outcome = SimulatedOrderer::new().submit_order(&spec(false)).await.unwrap();
        assert!(outcome.is_skipped());
    }

    #[tokio::test]
    async fn queries_report_nothing() {
        let settled = SimulatedOrderer::new()
            .query_orders(&[TransactionId::new(SIMULATED_TRANSACTION_ID)])
            .await
            .unwrap();
        assert!(settled.is_empty());
    }
}
