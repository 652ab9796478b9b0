//! Handler for the `reconcile` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::{with_deadline, Pipeline};

/// Run one reconciliation pass and report what was handed downstream.
pub async fn execute(pipeline: &Pipeline) -> Result<()> {
    let config = pipeline.config();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Queue", &config.queue.url);
    output::field("Batch", config.queue.receive_batch_size);
    output::field("Job", &config.job.name);

    let report = with_deadline(config.deadline_secs, pipeline.reconcile()).await?;

    output::result("reconcile", json!(report));

    output::section("Reconciliation");
    output::field("Received", report.received);
    output::field("Processed", report.processed);
    output::field("Discarded", report.discarded);
    for settlement in &report.settlements {
        output::success(&format!(
            "{} {} run {}",
            output::highlight(&settlement.transaction_id),
            settlement.location,
            settlement.job_run_id
        ));
    }
    if output::verbosity() > 0 && report.discarded > 0 {
        output::note("Discarded messages carried simulated orders");
    }
    Ok(())
}
