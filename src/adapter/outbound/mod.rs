//! Outbound adapters (driven side).

pub mod kraken;
pub mod local;
pub mod simulated;
