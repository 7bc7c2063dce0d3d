//! sw-db - Database layer for Sqlward
//!
//! This crate owns every interaction with the remote Postgres
//! endpoint: acquiring a bounded-timeout pooled connection, executing
//! one changeset per session (transactional or autocommit), and
//! reading system catalogs for verification. The [`SqlSession`] and
//! [`Catalog`] traits are the seams the verification engine and the
//! tests mock.

pub mod catalog;
pub mod connect;
pub mod error;
pub mod executor;
pub mod session;

pub use catalog::{BucketRow, Catalog, PgCatalog, PolicyRow};
pub use connect::{connect, ConnectTarget};
pub use error::{DbError, DbResult};
pub use executor::{execute, ExecutionMode, ExecutionResult};
pub use session::{PgSession, SqlSession};
