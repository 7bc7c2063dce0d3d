//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use sw_db::ExecutionMode;

/// Sqlward - apply a SQL changeset and verify the resulting catalog state
#[derive(Parser, Debug)]
#[command(name = "sqlward")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project config file
    #[arg(short, long, global = true, default_value = "sqlward.yml")]
    pub config: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a changeset to the remote database
    Apply(ApplyArgs),

    /// Run an invariant battery against the remote catalog
    Verify(VerifyArgs),

    /// Apply a changeset, then verify the resulting catalog state
    Run(RunArgs),
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the SQL changeset file
    pub changeset: String,

    /// Execution mode (documented per changeset, never inferred)
    #[arg(short, long, value_enum, default_value = "transactional")]
    pub mode: Mode,
}

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Name of the invariant battery to run
    #[arg(short, long, default_value = "storage")]
    pub battery: String,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the SQL changeset file
    pub changeset: String,

    /// Execution mode (documented per changeset, never inferred)
    #[arg(short, long, value_enum, default_value = "transactional")]
    pub mode: Mode,

    /// Name of the invariant battery to run after execution
    #[arg(short, long, default_value = "storage")]
    pub battery: String,
}

/// Execution mode flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Whole changeset in one transaction
    Transactional,
    /// Each embedded statement commits independently
    Autocommit,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Transactional => ExecutionMode::Transactional,
            Mode::Autocommit => ExecutionMode::Autocommit,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
