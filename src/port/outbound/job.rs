//! Downstream batch-job port.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::JobRunId;
use crate::error::Result;

/// Starts downstream batch jobs. Fire-and-forget: no completion wait.
#[async_trait]
pub trait JobLauncher: Send + Sync {
    /// Start a run of `job_name` with the given arguments.
    async fn start_job_run(
        &self,
        job_name: &str,
        arguments: &BTreeMap<String, String>,
    ) -> Result<JobRunId>;
}
