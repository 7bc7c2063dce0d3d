//! sw-verify - Post-migration verification engine
//!
//! Runs a battery of read-only structural assertions against the
//! system catalogs and aggregates one report per invocation. The full
//! battery always runs: an unsatisfied invariant never aborts the
//! remaining checks.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::verify;
pub use error::{VerifyError, VerifyResult};
pub use report::{CheckOutcome, VerificationReport};
