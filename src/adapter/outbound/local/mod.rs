//! Local stand-ins for the cloud services the pipeline talks to.
//!
//! These let `dca` run end to end on one machine: archive objects are files,
//! the queue is a spool directory, credentials come from the environment and
//! jobs are local processes.

pub mod archive;
pub mod credential;
pub mod job;
pub mod queue;

pub use archive::FileArchiveStore;
pub use credential::EnvCredentialStore;
pub use job::{LoggingJobLauncher, ProcessJobLauncher};
pub use queue::SpoolQueue;
