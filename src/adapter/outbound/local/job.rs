//! Local job launchers.

use std::collections::BTreeMap;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::domain::JobRunId;
use crate::error::{Error, Result};
use crate::port::JobLauncher;

/// Command-line arguments for a job run: `--JOB_NAME <name>` then each
/// argument pair in key order.
#[must_use]
pub fn job_command_args(job_name: &str, arguments: &BTreeMap<String, String>) -> Vec<String> {
    let mut args = vec!["--JOB_NAME".to_string(), job_name.to_string()];
    for (name, value) in arguments {
        args.push(name.clone());
        args.push(value.clone());
    }
    args
}

/// Spawns a local program for every job run and does not wait for it.
#[derive(Debug, Clone)]
pub struct ProcessJobLauncher {
    program: String,
}

impl ProcessJobLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl JobLauncher for ProcessJobLauncher {
    async fn start_job_run(
        &self,
        job_name: &str,
        arguments: &BTreeMap<String, String>,
    ) -> Result<JobRunId> {
        let run_id = JobRunId::generate();
        let child = Command::new(&self.program)
            .args(job_command_args(job_name, arguments))
            .env("DCA_JOB_RUN_ID", run_id.as_str())
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| Error::JobSubmission {
                job: job_name.to_string(),
                reason: format!("{}: {e}", self.program),
            })?;

        info!(
            job = job_name,
            run_id = %run_id,
            pid = ?child.id(),
            "Started job run"
        );
        Ok(run_id)
    }
}

/// Records job runs in the log without starting anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingJobLauncher;

#[async_trait]
impl JobLauncher for LoggingJobLauncher {
    async fn start_job_run(
        &self,
        job_name: &str,
        arguments: &BTreeMap<String, String>,
    ) -> Result<JobRunId> {
        let run_id = JobRunId::generate();
        info!(job = job_name, run_id = %run_id, arguments = ?arguments, "Job run requested");
        Ok(run_id)
    }
}
