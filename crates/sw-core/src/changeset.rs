//! Changeset loading.
//!
//! A [`Changeset`] is one SQL script applied as a unit. The content is
//! treated as an opaque blob: no parsing and no statement splitting
//! happen here. A file containing several semicolon-terminated
//! statements is handed verbatim to the database engine, which splits
//! and executes them itself.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// One SQL script, loaded whole, immutable after loading.
#[derive(Debug, Clone)]
pub struct Changeset {
    path: PathBuf,
    sql: String,
}

impl Changeset {
    /// Load a changeset from `path`.
    ///
    /// Fails with [`CoreError::ChangesetNotFound`] when the path does not
    /// resolve to a file, before any database connection is opened.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let sql = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::ChangesetNotFound {
                path: path.display().to_string(),
            },
            _ => CoreError::ChangesetRead {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;
        log::debug!(
            "Loaded changeset {} ({} bytes)",
            path.display(),
            sql.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            sql,
        })
    }

    /// Source path the changeset was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full SQL content, verbatim.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Content size in bytes, reported for diagnostics.
    pub fn byte_len(&self) -> usize {
        self.sql.len()
    }
}

#[cfg(test)]
#[path = "changeset_test.rs"]
mod tests;
