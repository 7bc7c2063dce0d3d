//! Error types for sw-verify

use thiserror::Error;

/// Verification engine errors.
///
/// An unsatisfied invariant is *not* an error — it is a data outcome
/// in the report. Only infrastructure failures (the catalog itself
/// unreadable) surface here.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// V001: A catalog query could not be executed
    #[error("[V001] Verification catalog access failed: {0}")]
    Catalog(#[from] sw_db::DbError),
}

/// Result type alias for [`VerifyError`].
pub type VerifyResult<T> = Result<T, VerifyError>;
