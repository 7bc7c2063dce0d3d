//! Migration executor.
//!
//! Runs exactly one changeset per invocation. There is no migration
//! ledger and no retry: idempotence of the SQL is the changeset
//! author's responsibility, and a failure is fatal to the invocation.

use crate::error::DbResult;
use crate::session::SqlSession;
use std::time::Instant;
use sw_core::Changeset;

/// How the changeset's statements relate to transaction boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// The whole blob runs inside one explicit transaction: all or
    /// nothing.
    Transactional,
    /// Each embedded statement takes effect independently. Needed when
    /// a changeset mixes DDL with storage-admin operations that cannot
    /// share a transaction; a later failure leaves earlier statements
    /// committed.
    Autocommit,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Transactional => f.write_str("transactional"),
            ExecutionMode::Autocommit => f.write_str("autocommit"),
        }
    }
}

/// Outcome of one changeset execution.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub mode: ExecutionMode,
    /// Total rows affected across the blob's statements. A changeset
    /// producing no rows is not an error.
    pub rows_affected: u64,
    pub duration_secs: f64,
    /// Error detail when the engine rejected the changeset.
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Execute `changeset` over `session` in the given mode.
///
/// The session is closed on every exit path. In transactional mode a
/// failure rolls back and commit is never attempted; in autocommit
/// mode a mid-blob failure leaves earlier statements committed, which
/// the caller opted into via `mode`.
pub async fn execute(
    session: &mut dyn SqlSession,
    changeset: &Changeset,
    mode: ExecutionMode,
) -> ExecutionResult {
    let start = Instant::now();
    log::debug!(
        "Executing changeset {} ({} bytes, {mode} mode)",
        changeset.path().display(),
        changeset.byte_len()
    );

    let outcome = run(session, changeset, mode).await;

    if let Err(close_err) = session.close().await {
        log::warn!("Failed to close execution session: {close_err}");
    }

    let duration_secs = start.elapsed().as_secs_f64();
    match outcome {
        Ok(rows_affected) => ExecutionResult {
            mode,
            rows_affected,
            duration_secs,
            error: None,
        },
        Err(e) => ExecutionResult {
            mode,
            rows_affected: 0,
            duration_secs,
            error: Some(e.to_string()),
        },
    }
}

async fn run(
    session: &mut dyn SqlSession,
    changeset: &Changeset,
    mode: ExecutionMode,
) -> DbResult<u64> {
    match mode {
        ExecutionMode::Autocommit => session.run_batch(changeset.sql()).await,
        ExecutionMode::Transactional => {
            session.begin().await?;
            let rows = match session.run_batch(changeset.sql()).await {
                Ok(rows) => rows,
                Err(e) => {
                    let _ = session.rollback().await;
                    return Err(e);
                }
            };
            if let Err(commit_err) = session.commit().await {
                let _ = session.rollback().await;
                return Err(commit_err);
            }
            Ok(rows)
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
