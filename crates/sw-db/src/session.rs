//! Database session abstraction.
//!
//! [`SqlSession`] is the seam between the migration executor and the
//! wire: one batch submission plus explicit transaction control. The
//! Postgres implementation issues `BEGIN` / `COMMIT` / `ROLLBACK` as
//! literal statements, which keeps the executor's transaction handling
//! testable against a scripted fake.

use crate::error::{DbError, DbResult};
use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPool;
use sqlx::Postgres;

/// One database session, exclusively owned by a single phase.
///
/// Implementations must be Send for async operation.
#[async_trait]
pub trait SqlSession: Send {
    /// Submit a full SQL blob as one batch call. The engine splits and
    /// executes embedded statements; the returned count is the total
    /// of affected rows.
    async fn run_batch(&mut self, sql: &str) -> DbResult<u64>;

    /// Open an explicit transaction.
    async fn begin(&mut self) -> DbResult<()>;

    /// Commit the open transaction.
    async fn commit(&mut self) -> DbResult<()>;

    /// Roll back the open transaction.
    async fn rollback(&mut self) -> DbResult<()>;

    /// Release the session. Must be called on all exit paths.
    async fn close(&mut self) -> DbResult<()>;
}

/// Postgres session pinned to one pooled connection.
///
/// Pinning matters: transaction control statements must hit the same
/// wire session as the batch they bracket.
pub struct PgSession {
    pool: PgPool,
    // Taken back out before the pool is closed, so close() cannot wait
    // on a connection the session itself still holds.
    conn: Option<PoolConnection<Postgres>>,
}

impl PgSession {
    /// Acquire the session's connection from `pool`.
    pub async fn open(pool: PgPool) -> DbResult<Self> {
        let conn = pool
            .acquire()
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            pool,
            conn: Some(conn),
        })
    }

    fn conn(&mut self) -> DbResult<&mut PoolConnection<Postgres>> {
        self.conn
            .as_mut()
            .ok_or_else(|| DbError::ConnectionError("session already closed".to_string()))
    }

    async fn control(&mut self, stmt: &str) -> DbResult<()> {
        let conn = self.conn()?;
        exec_raw(conn, stmt)
            .await
            .map_err(|e| DbError::TransactionError(format!("{stmt} failed: {e}")))?;
        Ok(())
    }
}

// Free helper so the inner sqlx future has a concrete (early-bound)
// lifetime; executing directly inside the `async_trait`-boxed future
// trips rustc's higher-ranked `Send` check ("implementation of
// `Executor` is not general enough", rust-lang/rust#102211).
async fn exec_raw(
    conn: &mut PoolConnection<Postgres>,
    sql: &str,
) -> Result<sqlx::postgres::PgQueryResult, sqlx::Error> {
    use sqlx::Executor as _;
    (&mut **conn).execute(sqlx::raw_sql(sql)).await
}

#[async_trait]
impl SqlSession for PgSession {
    async fn run_batch(&mut self, sql: &str) -> DbResult<u64> {
        let conn = self.conn()?;
        let result = exec_raw(conn, sql)
            .await
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(result.rows_affected())
    }

    async fn begin(&mut self) -> DbResult<()> {
        self.control("BEGIN").await
    }

    async fn commit(&mut self) -> DbResult<()> {
        self.control("COMMIT").await
    }

    async fn rollback(&mut self) -> DbResult<()> {
        self.control("ROLLBACK").await
    }

    async fn close(&mut self) -> DbResult<()> {
        drop(self.conn.take());
        self.pool.close().await;
        Ok(())
    }
}
