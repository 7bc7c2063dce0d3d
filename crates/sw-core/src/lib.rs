//! sw-core - Core types for Sqlward
//!
//! This crate provides the changeset loader, the project configuration
//! model, and the invariant battery definitions shared by the database
//! and verification layers.

pub mod changeset;
pub mod config;
pub mod error;
pub mod invariant;

pub use changeset::Changeset;
pub use config::{ConnectionConfig, ProjectConfig};
pub use error::{CoreError, CoreResult};
pub use invariant::{default_battery, Invariant, PolicyCommand, DEFAULT_BATTERY_NAME};
