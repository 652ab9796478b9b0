//! Exchange-agnostic domain types for the order lifecycle.

pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod pending;
pub mod settlement;
pub mod submission;

// Core domain types
pub use id::{JobRunId, TransactionId};
pub use money::{Price, Volume};
pub use order::{DcaOrderSpec, Direction, OrderList};
pub use pending::{ArchiveLocation, PendingOrderRecord};
pub use settlement::SettledOrder;
pub use submission::{SubmitOutcome, SubmittedOrder};
