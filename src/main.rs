use clap::Parser;
use dca_pipeline::adapter::inbound::cli::command::Cli;
use dca_pipeline::adapter::inbound::cli::output::{self, OutputConfig};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    tokio::select! {
        result = dca_pipeline::adapter::inbound::cli::run(&cli) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                output::error(&e.to_string());
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            warn!("Interrupted, abandoning the current pass");
            output::warning("Interrupted");
            std::process::exit(130);
        }
    }

    info!("dca finished");
}
