//! Results of placing an order on an exchange.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DomainError;
use super::id::TransactionId;

/// An order the exchange has accepted but not necessarily settled.
///
/// The `result` payload is whatever the exchange sent back, kept verbatim
/// for audit. Only the orderer for that exchange ever looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSubmittedOrder")]
pub struct SubmittedOrder {
    transaction_id: TransactionId,
    timestamp: i64,
    result: Value,
}

#[derive(Deserialize)]
struct RawSubmittedOrder {
    transaction_id: TransactionId,
    timestamp: i64,
    #[serde(default)]
    result: Value,
}

impl TryFrom<RawSubmittedOrder> for SubmittedOrder {
    type Error = DomainError;

    fn try_from(raw: RawSubmittedOrder) -> Result<Self, Self::Error> {
        Self::try_new(raw.transaction_id, raw.timestamp, raw.result)
    }
}

impl SubmittedOrder {
    /// Create a submitted order, rejecting an empty transaction id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTransactionId`] if the id is blank.
    pub fn try_new(
        transaction_id: impl Into<TransactionId>,
        timestamp: i64,
        result: Value,
    ) -> Result<Self, DomainError> {
        let transaction_id = transaction_id.into();
        if transaction_id.is_empty() {
            return Err(DomainError::EmptyTransactionId);
        }
        Ok(Self {
            transaction_id,
            timestamp,
            result,
        })
    }

    #[must_use]
    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// Submission time in epoch seconds.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn result(&self) -> &Value {
        &self.result
    }
}

/// Outcome of asking an orderer to submit a configured order.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The exchange accepted the order.
    Submitted(SubmittedOrder),
    /// The order is disabled in configuration; nothing was sent.
    Skipped,
    /// The exchange validated the order without placing it.
    Validated,
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Get the submitted order if one was placed.
    #[must_use]
    pub fn into_submitted(self) -> Option<SubmittedOrder> {
        match self {
            Self::Submitted(order) => Some(order),
            Self::Skipped | Self::Validated => None,
        }
    }
}
