//! Kraken implementation of the [`Orderer`] port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::client::KrakenApi;
use super::dto::{AddOrderRequest, AddOrderResult, KrakenOrder};
use crate::domain::{DcaOrderSpec, SettledOrder, SubmitOutcome, SubmittedOrder, TransactionId};
use crate::error::{ExchangeError, Result};
use crate::port::Orderer;

/// Places and reconciles DCA orders on Kraken.
pub struct KrakenOrderer {
    api: Arc<dyn KrakenApi>,
}

impl KrakenOrderer {
    pub fn new(api: Arc<dyn KrakenApi>) -> Self {
        Self { api }
    }

    fn settle(transaction_id: String, order: KrakenOrder) -> SettledOrder {
        SettledOrder {
            transaction_id: TransactionId::new(transaction_id),
            exchange_status: order.status,
            pair: order.descr.pair,
            order_type: order.descr.ordertype,
            side: order.descr.side,
            price: order.price,
            fee: order.fee,
            volume: order.vol_exec,
            open_time: order.opentm,
            close_time: order.closetm,
        }
    }
}

#[async_trait]
impl Orderer for KrakenOrderer {
    async fn submit_order(&self, spec: &DcaOrderSpec) -> Result<SubmitOutcome> {
        info!(
            exchange = %spec.exchange,
            pair = %spec.pair,
            direction = %spec.direction,
            order_type = %spec.order_kind,
            volume = %spec.volume,
            enabled = spec.enabled,
            "Making order"
        );

        if !spec.enabled {
            warn!(pair = %spec.pair, "Order disabled, skipping");
            return Ok(SubmitOutcome::Skipped);
        }

        let request = AddOrderRequest::from_spec(spec);
        let raw = self
            .api
            .add_order(&request)
            .await
            .map_err(|e| ExchangeError::Submission(e.to_string()))?;

        let parsed: AddOrderResult = serde_json::from_value(raw.clone()).map_err(|e| {
            ExchangeError::Submission(format!("unexpected AddOrder response: {e}"))
        })?;

        if spec.validate {
            info!(description = %parsed.descr, "Order validated by exchange, not placed");
            return Ok(SubmitOutcome::Validated);
        }

        let transaction_ids: Vec<String> = parsed
            .txid
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .collect();

        info!(transaction_ids = ?transaction_ids, "Order response");

        if transaction_ids.len() > 1 {
            warn!(
                transaction_ids = ?transaction_ids,
                "Received more than one transaction id, using the first"
            );
        }

        let transaction_id = transaction_ids
            .into_iter()
            .next()
            .ok_or_else(|| ExchangeError::Submission("no transaction ids received".to_string()))?;

        let order = SubmittedOrder::try_new(transaction_id, Utc::now().timestamp(), raw)?;
        Ok(SubmitOutcome::Submitted(order))
    }

    async fn query_orders(&self, transaction_ids: &[TransactionId]) -> Result<Vec<SettledOrder>> {
        if transaction_ids.is_empty() {
            return Err(ExchangeError::NoTransactionIds.into());
        }

        let joined = transaction_ids
            .iter()
            .map(TransactionId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        info!(transaction_ids = %joined, "Getting details for transactions");
        let mut orders = self
            .api
            .query_orders(&joined)
            .await
            .map_err(|e| ExchangeError::Query(e.to_string()))?;

        let mut settled = Vec::with_capacity(orders.len());
        for id in transaction_ids {
            if let Some(order) = orders.remove(id.as_str()) {
                settled.push(Self::settle(id.as_str().to_string(), order));
            } else {
                debug!(transaction_id = %id, "Exchange did not report transaction");
            }
        }

        let mut unrequested: Vec<_> = orders.into_iter().collect();
        unrequested.sort_by(|a, b| a.0.cmp(&b.0));
        for (id, order) in unrequested {
            settled.push(Self::settle(id, order));
        }

        debug!(count = settled.len(), "Mapped settled orders");
        Ok(settled)
    }

    fn exchange_name(&self) -> &'static str {
        "kraken"
    }
}
