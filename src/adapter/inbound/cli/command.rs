//! Command-line interface definitions.
//!
//! Defines the CLI structure for the `dca` binary using `clap`. Each
//! invocation runs one pipeline stage and exits.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dollar-cost-average order execution and settlement reconciliation
#[derive(Parser, Debug)]
#[command(name = "dca")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "dca.toml")]
    pub config: PathBuf,

    /// Simulate orders regardless of configuration
    #[arg(long, global = true, conflicts_with = "real")]
    pub simulate: bool,

    /// Place real orders regardless of configuration
    #[arg(long, global = true)]
    pub real: bool,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Simulate-mode override from `--simulate` / `--real`, if any.
    #[must_use]
    pub const fn simulate_override(&self) -> Option<bool> {
        if self.simulate {
            Some(true)
        } else if self.real {
            Some(false)
        } else {
            None
        }
    }
}

/// Top-level subcommands for the `dca` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit every configured order, archive it and queue it for settlement
    Execute,

    /// Reconcile queued orders with their exchanges
    Reconcile(ReconcileArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `dca reconcile`.
#[derive(clap::Args, Debug, Default)]
pub struct ReconcileArgs {
    /// Maximum queue messages to process (1-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max: Option<u8>,
}

/// Subcommands for `dca config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration and print the effective settings
    Check,
}
