//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (exchanges, object storage, queues, secret stores, job services).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │ executor ─ reconciler   │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Exchange │            │ Archive /   │              │    Job    │
//! │ Adapter │            │ Queue       │              │ Launcher  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::archive::ArchiveStore;
pub use outbound::configuration::ConfigurationSource;
pub use outbound::credential::CredentialStore;
pub use outbound::exchange::Orderer;
pub use outbound::job::JobLauncher;
pub use outbound::queue::{MessageQueue, OutgoingMessage, QueueMessage};
