//! Exchange port for order submission and settlement queries.
//!
//! This is the one extension point the pipeline dispatches on: adding an
//! exchange means implementing [`Orderer`] and registering it, never
//! touching the executor or reconciler.

use async_trait::async_trait;

use crate::domain::{DcaOrderSpec, SettledOrder, SubmitOutcome, TransactionId};
use crate::error::Result;

/// Places and queries orders against one exchange.
#[async_trait]
pub trait Orderer: Send + Sync {
    /// Submit a configured order.
    ///
    /// Disabled orders return [`SubmitOutcome::Skipped`] without contacting
    /// the exchange. A successful submission always carries a non-empty
    /// transaction id; when the exchange returns several, the first one is
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Submission`](crate::error::ExchangeError::Submission)
    /// if the exchange rejects the order or returns no transaction id.
    async fn submit_order(&self, spec: &DcaOrderSpec) -> Result<SubmitOutcome>;

    /// Query the current state of previously submitted orders.
    ///
    /// The response may be partial: ids the exchange does not report are
    /// simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::NoTransactionIds`](crate::error::ExchangeError::NoTransactionIds)
    /// without calling the exchange when `transaction_ids` is empty, or
    /// [`ExchangeError::Query`](crate::error::ExchangeError::Query) if the
    /// query fails.
    async fn query_orders(&self, transaction_ids: &[TransactionId]) -> Result<Vec<SettledOrder>>;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}
