//! CLI module graph.

pub mod command;
pub mod config;
pub mod execute;
pub mod output;
pub mod reconcile;

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::bootstrap::{Pipeline, Services};
use crate::infrastructure::config::Config;
use command::{Cli, Commands, ConfigCommand};

/// Load the configuration named on the command line and apply CLI overrides.
///
/// # Errors
///
/// Fails if the file cannot be read or does not validate.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(simulate) = cli.simulate_override() {
        config.simulate = simulate;
    }
    if let Commands::Reconcile(args) = &cli.command {
        if let Some(max) = args.max {
            config.queue.receive_batch_size = usize::from(max);
        }
    }
    config.logging.apply_verbosity(cli.verbose);
    Ok(config)
}

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns the first error raised by the selected command.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    config.init_logging();
    debug!(path = %cli.config.display(), simulate = config.simulate, "Loaded configuration");

    match &cli.command {
        Commands::Config(ConfigCommand::Check) => config::execute_check(&config),
        Commands::Execute => {
            let pipeline = Pipeline::new(config.clone(), Services::local(&config));
            execute::execute(&pipeline).await
        }
        Commands::Reconcile(_) => {
            let pipeline = Pipeline::new(config.clone(), Services::local(&config));
            reconcile::execute(&pipeline).await
        }
    }
}
