use clap::{Parser, Subcommand};

use crate::cli::RunArgs;

/// Command-line interface for the Stepwise workflow runner
///
/// Stepwise publishes an offchain governance proposal against a simulated
/// backend, showing the status of every step as it goes. Failures and
/// timeouts can be scripted to watch the tracker report errors and the
/// workflow resume on retry.
#[derive(Parser)]
#[command(version, about, name = "stepwise")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Stepwise CLI
#[derive(Subcommand)]
pub enum Commands {
    /// List the steps of the proposal workflow
    #[command(alias = "s")]
    Steps,
    /// Publish a proposal, retrying failed steps
    #[command(alias = "r")]
    Run(RunArgs),
}
