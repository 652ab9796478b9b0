//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and validation
//! methods when a pipeline record would violate its invariants.
//!
//! # Examples
//!
//! ```
//! use dca_pipeline::domain::error::DomainError;
//! use dca_pipeline::domain::SubmittedOrder;
//! use serde_json::json;
//!
//! let result = SubmittedOrder::try_new("", 1_700_000_000, json!({}));
//! assert!(matches!(result, Err(DomainError::EmptyTransactionId)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A submitted order must carry the exchange-assigned transaction id.
    #[error("transaction id cannot be empty")]
    EmptyTransactionId,

    /// Volume must be positive for an order to be placed.
    #[error("volume must be positive, got {volume}")]
    NonPositiveVolume {
        /// The invalid volume that was provided.
        volume: rust_decimal::Decimal,
    },

    /// A required order field was blank.
    #[error("order field {field} cannot be empty")]
    EmptyField {
        /// Name of the blank field.
        field: &'static str,
    },
}
