//! Error types for sw-core

use thiserror::Error;

/// Core error type for Sqlward
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Changeset file does not exist or is not a readable file
    #[error("[C001] Changeset not found: {path}")]
    ChangesetNotFound { path: String },

    /// C002: Changeset file exists but could not be read
    #[error("[C002] Failed to read changeset {path}: {message}")]
    ChangesetRead { path: String, message: String },

    /// C003: Configuration file not found
    #[error("[C003] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C004: Failed to parse configuration file
    #[error("[C004] Failed to parse config {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// C005: Invalid configuration value
    #[error("[C005] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C006: Requested invariant battery is not declared
    #[error("[C006] Battery '{name}' not found. Available batteries: {available}")]
    BatteryNotFound { name: String, available: String },

    /// C007: Credential environment variable is unset
    #[error("[C007] Missing secret: environment variable '{var}' is not set")]
    MissingSecret { var: String },
}

/// Result type alias for [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
