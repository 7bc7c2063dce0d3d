//! Connection acquisition.
//!
//! One [`ConnectTarget`] describes the remote endpoint (typically a
//! pooled proxy in front of the database). [`connect`] opens a
//! single-connection pool with a bounded acquire timeout, so timeouts
//! and authentication failures surface as [`DbError::ConnectionError`]
//! instead of hanging the invocation.

use crate::error::{DbError, DbResult};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;

/// Network target plus credentials for one database session.
#[derive(Clone)]
pub struct ConnectTarget {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub connect_timeout: Duration,
}

// Secret material must never leak through Debug or Display; both
// render the target identity without the password.
impl fmt::Debug for ConnectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl fmt::Display for ConnectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

/// Open a single-connection pool against `target`.
///
/// The pool eagerly establishes one session, so unreachable hosts and
/// bad credentials fail here, within the configured timeout, before
/// any statement is submitted.
pub async fn connect(target: &ConnectTarget) -> DbResult<PgPool> {
    let options = PgConnectOptions::new()
        .host(&target.host)
        .port(target.port)
        .database(&target.database)
        .username(&target.user)
        .password(&target.password);

    log::debug!("Connecting to {target}");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(target.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| DbError::ConnectionError(format!("{target}: {e}")))?;
    Ok(pool)
}

#[cfg(test)]
#[path = "connect_test.rs"]
mod tests;
