//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`doubles`]: Recording and scripted port implementations:
//!   `RecordingArchive`, `RecordingQueue`, `RecordingJobLauncher`,
//!   `StaticCredentials`, `ScriptedOrderer`.
//! - [`domain`]: Builders for domain values: order specs, settled orders,
//!   queue messages.

pub mod doubles;
pub mod domain;
