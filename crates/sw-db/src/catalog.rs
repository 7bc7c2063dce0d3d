//! Read-only catalog access for verification.
//!
//! The verification engine never writes and never reuses the
//! executor's session; it reads committed state through a fresh
//! [`Catalog`] handle. Three registries matter here: the storage
//! bucket registry (`storage.buckets`), the row-level policy registry
//! (`pg_policies`), and the relation registry
//! (`information_schema.tables`).

use crate::error::{DbError, DbResult};
use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

/// One row of the storage bucket registry.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRow {
    pub name: String,
    pub public: bool,
    /// NULL in the catalog means every content type is allowed.
    pub allowed_mime_types: Option<Vec<String>>,
}

impl BucketRow {
    /// Human-readable MIME restriction status.
    pub fn mime_status(&self) -> String {
        match &self.allowed_mime_types {
            None => "all types allowed".to_string(),
            Some(types) => format!("restricted: {}", types.join(", ")),
        }
    }
}

/// One row of the policy registry.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRow {
    pub name: String,
    /// Command kind as the catalog reports it (SELECT, INSERT, UPDATE,
    /// DELETE, or ALL).
    pub command: String,
}

/// Read-only view of the system catalogs.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch one bucket by exact name, or None when absent.
    async fn bucket(&self, name: &str) -> DbResult<Option<BucketRow>>;

    /// Fetch the policies on `schema.table` whose names contain
    /// `name_fragment`. Policy names may carry generated suffixes, so
    /// matching is by fragment, not equality.
    async fn policies(
        &self,
        schema: &str,
        table: &str,
        name_fragment: &str,
    ) -> DbResult<Vec<PolicyRow>>;

    /// Whether a table or view exists in `schema`.
    async fn relation_exists(&self, schema: &str, name: &str) -> DbResult<bool>;
}

/// Postgres catalog reader over its own pool.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Release the underlying pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn decode_err(e: sqlx::Error) -> DbError {
    DbError::QueryError(format!("row decode failed: {e}"))
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn bucket(&self, name: &str) -> DbResult<Option<BucketRow>> {
        let row = sqlx::query(
            "SELECT name, public, allowed_mime_types FROM storage.buckets WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DbError::QueryError(format!("storage.buckets: {e}")))?;

        row.map(|row| {
            Ok(BucketRow {
                name: row.try_get("name").map_err(decode_err)?,
                public: row.try_get("public").map_err(decode_err)?,
                allowed_mime_types: row.try_get("allowed_mime_types").map_err(decode_err)?,
            })
        })
        .transpose()
    }

    async fn policies(
        &self,
        schema: &str,
        table: &str,
        name_fragment: &str,
    ) -> DbResult<Vec<PolicyRow>> {
        let rows = sqlx::query(
            "SELECT policyname, cmd FROM pg_policies \
             WHERE schemaname = $1 AND tablename = $2 \
               AND policyname ILIKE '%' || $3 || '%' \
             ORDER BY cmd, policyname",
        )
        .bind(schema)
        .bind(table)
        .bind(name_fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DbError::QueryError(format!("pg_policies: {e}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(PolicyRow {
                    name: row.try_get("policyname").map_err(decode_err)?,
                    command: row.try_get("cmd").map_err(decode_err)?,
                })
            })
            .collect()
    }

    async fn relation_exists(&self, schema: &str, name: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query(
            "SELECT COUNT(*) AS n FROM information_schema.tables \
             WHERE table_schema = $1 AND table_name = $2",
        )
        .bind(schema)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::QueryError(format!("information_schema.tables: {e}")))?
        .try_get("n")
        .map_err(decode_err)?;

        Ok(count > 0)
    }
}
