//! Handler for the `config` command group.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `config check`. Loading already validated the file; this prints
/// the effective settings.
pub fn execute_check(config: &Config) -> Result<()> {
    output::result(
        "config",
        json!({
            "valid": true,
            "simulate": config.simulate,
            "order_document": config.order_document().to_string(),
            "pending_prefix": config.archive.pending_prefix,
            "processed_prefix": config.archive.processed_prefix,
            "queue_url": config.queue.url,
            "job_name": config.job.name,
            "write_operation": config.job.write_operation,
        }),
    );

    output::section("Configuration");
    output::success("Configuration is valid");
    output::field("Mode", if config.simulate { "simulate" } else { "real" });
    output::field("Orders", config.order_document());
    output::field("Pending", &config.archive.pending_prefix);
    output::field("Processed", &config.archive.processed_prefix);
    output::field("Archive root", config.archive.root.display());
    output::field("Queue", &config.queue.url);
    output::field("Spool", config.queue.spool_dir.display());
    output::field("Job", &config.job.name);
    output::field("Write op", &config.job.write_operation);
    match &config.job.command {
        Some(command) => output::field("Job command", command),
        None => output::note("No job command set; job runs are only logged"),
    }
    if let Some(secs) = config.deadline_secs {
        output::field("Deadline", format!("{secs}s"));
    }
    output::field("Kraken API", &config.kraken.api_url);
    Ok(())
}
