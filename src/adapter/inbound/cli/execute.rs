//! Handler for the `execute` command.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::{with_deadline, Pipeline};

/// Run one execution pass and report the queued orders.
pub async fn execute(pipeline: &Pipeline) -> Result<()> {
    let config = pipeline.config();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Mode", if config.simulate { "simulate" } else { "real" });
    output::field("Orders", pipeline.config().order_document());
    if config.simulate {
        output::warning("Simulate mode: orders are not sent to any exchange");
    }

    let records = with_deadline(config.deadline_secs, pipeline.execute()).await?;

    output::result(
        "execute",
        json!({
            "simulate": config.simulate,
            "records": records,
        }),
    );

    output::section("Queued Orders");
    if records.is_empty() {
        output::note("No orders were placed");
    }
    for record in &records {
        output::success(&format!(
            "{} {}",
            output::highlight(&record.transaction_id),
            record.location()
        ));
    }
    Ok(())
}
