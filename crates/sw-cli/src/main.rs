//! Sqlward CLI - apply one SQL changeset and verify the resulting
//! catalog state

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod render;

use cli::Cli;
use commands::{apply, run, verify};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        cli::Commands::Apply(args) => apply::execute(args, &cli.global).await,
        cli::Commands::Verify(args) => verify::execute(args, &cli.global).await,
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
    }
}
