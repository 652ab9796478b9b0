//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external collaborators of the pipeline:
//! exchanges, archival storage, the pending-order queue, the secret store,
//! the downstream batch-job service, and the order configuration source.

pub mod archive;
pub mod configuration;
pub mod credential;
pub mod exchange;
pub mod job;
pub mod queue;
