//! Order execution: submit, archive and queue each configured order.

use std::sync::Arc;

use tracing::{info, warn};

use super::handoff::PendingOrderSubmitter;
use super::registry::OrdererRegistry;
use crate::domain::{ArchiveLocation, DcaOrderSpec, PendingOrderRecord, SubmitOutcome};
use crate::error::{Error, Result};
use crate::port::{ArchiveStore, Orderer};

/// Where submitted orders are archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorSettings {
    pub bucket: String,
    pub pending_prefix: String,
}

/// Runs one execution pass over the configured orders.
///
/// Orders are handled strictly one after another and the first failure
/// aborts the pass. Orders already archived and queued stay that way.
pub struct OrderExecutor {
    archive: Arc<dyn ArchiveStore>,
    submitter: PendingOrderSubmitter,
    simulation: Option<Arc<dyn Orderer>>,
    settings: ExecutorSettings,
}

impl OrderExecutor {
    pub fn new(
        archive: Arc<dyn ArchiveStore>,
        submitter: PendingOrderSubmitter,
        settings: ExecutorSettings,
    ) -> Self {
        Self {
            archive,
            submitter,
            simulation: None,
            settings,
        }
    }

    /// Route every order to `orderer` instead of the registry and mark
    /// queued records as not real.
    #[must_use]
    pub fn simulate_with(mut self, orderer: Arc<dyn Orderer>) -> Self {
        self.simulation = Some(orderer);
        self
    }

    #[must_use]
    pub const fn is_simulated(&self) -> bool {
        self.simulation.is_some()
    }

    fn orderer_for<'a>(
        &'a self,
        registry: &'a OrdererRegistry,
        exchange: &str,
    ) -> Result<&'a Arc<dyn Orderer>> {
        if let Some(simulated) = &self.simulation {
            return Ok(simulated);
        }
        registry
            .get(exchange)
            .ok_or_else(|| Error::UnknownExchange(exchange.to_string()))
    }

    /// Execute `orders` in configuration order.
    ///
    /// Returns one record per order that was placed, archived and queued,
    /// in configuration order. Disabled and validate-only orders produce no
    /// record, so the result is aligned with placed orders only, not by
    /// index with `orders`.
    ///
    /// # Errors
    ///
    /// Returns the first unknown-exchange, submission, archive, serialization
    /// or queue error encountered.
    pub async fn execute_orders(
        &self,
        registry: &OrdererRegistry,
        orders: &[DcaOrderSpec],
    ) -> Result<Vec<PendingOrderRecord>> {
        let is_simulated = self.is_simulated();
        if is_simulated {
            warn!(count = orders.len(), "Real trading not allowed, simulating orders");
        }

        let mut records = Vec::with_capacity(orders.len());
        for spec in orders {
            let orderer = self.orderer_for(registry, &spec.exchange)?;

            let order = match orderer.submit_order(spec).await? {
                SubmitOutcome::Submitted(order) => order,
                SubmitOutcome::Skipped => {
                    info!(exchange = %spec.exchange, pair = %spec.pair, "Order skipped");
                    continue;
                }
                SubmitOutcome::Validated => {
                    info!(exchange = %spec.exchange, pair = %spec.pair, "Order validated only");
                    continue;
                }
            };

            let location = ArchiveLocation::new(
                self.settings.bucket.clone(),
                ArchiveLocation::transaction_key(
                    &self.settings.pending_prefix,
                    &spec.exchange,
                    order.transaction_id(),
                ),
            );
            let bytes = serde_json::to_vec(&order)?;
            self.archive.put_object(&location, bytes).await?;
            info!(
                transaction_id = %order.transaction_id(),
                location = %location,
                "Archived submitted order"
            );

            let record = PendingOrderRecord::new(order.transaction_id().clone(), location);
            self.submitter
                .enqueue(&record, &spec.exchange, is_simulated)
                .await?;
            records.push(record);
        }

        info!(queued = records.len(), "Execution pass complete");
        Ok(records)
    }
}
