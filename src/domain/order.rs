//! Configured order intents.
//!
//! A [`DcaOrderSpec`] is one line of the declarative order list. The list is
//! read once per execution pass and never mutated while the pass runs.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl Direction {
    /// Wire representation used by exchanges.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured dollar-cost-average order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcaOrderSpec {
    /// Exchange name, used as the registry key.
    pub exchange: String,
    /// Trading pair as the exchange spells it (e.g. `BTCGBP`).
    pub pair: String,
    /// Buy or sell.
    pub direction: Direction,
    /// Exchange order kind (e.g. `market`, `limit`).
    #[serde(rename = "ordertype", default = "default_order_kind")]
    pub order_kind: String,
    /// Order volume. Kept as an exact decimal so the configured text reaches
    /// the exchange unchanged.
    pub volume: Decimal,
    /// Ask the exchange to validate the order without placing it.
    #[serde(default)]
    pub validate: bool,
    /// Disabled orders are skipped, not failed.
    #[serde(default)]
    pub enabled: bool,
}

fn default_order_kind() -> String {
    "market".to_string()
}

impl DcaOrderSpec {
    /// Check the invariants every order must satisfy before submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange or pair is blank or the volume is not
    /// strictly positive.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        if self.exchange.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "exchange" });
        }
        if self.pair.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "pair" });
        }
        if self.order_kind.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "ordertype" });
        }
        if self.volume <= Decimal::ZERO {
            return Err(DomainError::NonPositiveVolume {
                volume: self.volume,
            });
        }
        Ok(())
    }
}

/// Root of the order configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderList {
    /// Orders in the sequence they must be placed.
    #[serde(default)]
    pub orders: Vec<DcaOrderSpec>,
}
