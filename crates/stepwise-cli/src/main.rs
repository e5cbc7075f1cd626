//! Stepwise CLI Application
//!
//! Command-line runner for multi-step proposal workflows.

mod args;
mod backend;
mod cli;
mod renderer;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { no_color, command } = Args::parse();

    let cli = Cli::new(TerminalRenderer::new(!no_color));

    info!("Stepwise started");

    match command {
        Some(Run(args)) => cli.run(args).await,
        Some(Steps) | None => cli.list_steps(),
    }
}
