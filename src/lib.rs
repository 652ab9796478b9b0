//! dca-pipeline - Dollar-cost-average order execution and settlement
//! reconciliation.
//!
//! The pipeline has two stages, each run as one short-lived invocation:
//!
//! - **Execution** reads the declarative order list, submits each enabled
//!   order to its exchange, archives the submission and queues a pending
//!   record for settlement.
//! - **Reconciliation** drains pending records, queries the exchange for
//!   their settled state, archives canonical settlement records and starts
//!   the downstream ingestion job for each.
//!
//! # Architecture
//!
//! - [`domain`] - Exchange-agnostic types: order specs, submissions,
//!   pending records, settlements
//! - [`port`] - Traits for exchanges, archive storage, queues, credentials,
//!   jobs and configuration sources
//! - [`application`] - The executor, reconciler and orderer registry
//! - [`adapter`] - Kraken, simulated and local implementations of the ports,
//!   plus the `dca` command line
//! - [`infrastructure`] - Configuration loading and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use dca_pipeline::infrastructure::bootstrap::{Pipeline, Services};
//! use dca_pipeline::infrastructure::config::Config;
//!
//! # async fn run() -> dca_pipeline::error::Result<()> {
//! let config = Config::load("dca.toml")?;
//! let pipeline = Pipeline::new(config.clone(), Services::local(&config));
//! let queued = pipeline.execute().await?;
//! println!("queued {} orders", queued.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
