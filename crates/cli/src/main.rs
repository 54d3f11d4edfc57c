//! Realloc CLI - plan public-allocator reallocations.

// Command output goes to stdout; only diagnostics go through tracing
#![allow(clippy::print_stdout)]

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_capacity, run_plan};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Capacity(args) => {
            run_capacity(&args, cli.format).await?;
        }
        Commands::Plan(args) => {
            run_plan(&args, cli.format).await?;
        }
    }

    Ok(())
}
