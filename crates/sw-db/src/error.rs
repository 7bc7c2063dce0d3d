//! Error types for sw-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection or authentication failure (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// The engine rejected or failed mid-way through a changeset (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Read-only catalog query failure (D003)
    #[error("[D003] Catalog query failed: {0}")]
    QueryError(String),

    /// BEGIN/COMMIT/ROLLBACK control statement failure (D004)
    #[error("[D004] Transaction control failed: {0}")]
    TransactionError(String),
}

/// Result type alias for [`DbError`].
pub type DbResult<T> = Result<T, DbError>;
