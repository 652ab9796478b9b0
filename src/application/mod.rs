//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through ports to implement the two pipeline stages: execution and
//! reconciliation.

pub mod configuration;
pub mod executor;
pub mod handoff;
pub mod reconciler;
pub mod registry;

pub use configuration::ArchiveConfigurationSource;
pub use executor::{ExecutorSettings, OrderExecutor};
pub use handoff::PendingOrderSubmitter;
pub use reconciler::{ReconcileReport, ReconcilerSettings, SettlementHandoff, TransactionReconciler};
pub use registry::OrdererRegistry;
