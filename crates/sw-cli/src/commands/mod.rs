//! Subcommand implementations

pub mod apply;
pub mod common;
pub mod run;
pub mod verify;
