//! Expected post-migration invariants.
//!
//! An [`Invariant`] is one structural fact the remote catalog must show
//! after a changeset has been applied: a storage bucket with a given
//! visibility, a set of row-level policies covering a bucket, or a
//! relation existing in a schema. Batteries of invariants are static
//! and versioned in the project config; they are never derived from
//! the changeset being applied.

use serde::{Deserialize, Serialize};

/// The four policy command kinds an invariant may require.
///
/// Policy names in the catalog may carry generated suffixes, so
/// coverage is matched against this allow-list of command kinds rather
/// than against exact policy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyCommand {
    Select,
    Insert,
    Update,
    Delete,
}

impl PolicyCommand {
    /// The `cmd` value `pg_policies` reports for this kind.
    pub fn as_sql(self) -> &'static str {
        match self {
            PolicyCommand::Select => "SELECT",
            PolicyCommand::Insert => "INSERT",
            PolicyCommand::Update => "UPDATE",
            PolicyCommand::Delete => "DELETE",
        }
    }

    /// Whether a catalog `cmd` value satisfies this kind.
    ///
    /// A policy declared `FOR ALL` covers every command kind.
    pub fn covered_by(self, catalog_cmd: &str) -> bool {
        catalog_cmd.eq_ignore_ascii_case("ALL")
            || catalog_cmd.eq_ignore_ascii_case(self.as_sql())
    }

    /// All four kinds, in catalog ordering.
    pub fn all() -> [PolicyCommand; 4] {
        [
            PolicyCommand::Select,
            PolicyCommand::Insert,
            PolicyCommand::Update,
            PolicyCommand::Delete,
        ]
    }
}

impl std::fmt::Display for PolicyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

fn default_policy_schema() -> String {
    "storage".to_string()
}

fn default_policy_table() -> String {
    "objects".to_string()
}

/// One expected structural assertion, checked read-only after a
/// migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Invariant {
    /// A storage bucket exists, optionally with a required `public`
    /// flag (strict boolean equality) and an optional requirement that
    /// its MIME-type allow-list is unrestricted (NULL in the catalog).
    Bucket {
        name: String,
        #[serde(default)]
        public: Option<bool>,
        #[serde(default)]
        unrestricted_mime: Option<bool>,
    },

    /// The policy set on `schema.table` scoped to `bucket` (by policy
    /// name fragment) covers every listed command kind.
    PolicyCoverage {
        bucket: String,
        commands: Vec<PolicyCommand>,
        #[serde(default = "default_policy_schema")]
        schema: String,
        #[serde(default = "default_policy_table")]
        table: String,
    },

    /// A table or view exists in `schema`.
    Relation { schema: String, name: String },
}

impl Invariant {
    /// Report grouping subject. Evaluation order never depends on the
    /// subject; it exists purely for rendering.
    pub fn subject(&self) -> &'static str {
        match self {
            Invariant::Bucket { .. } => "bucket configuration",
            Invariant::PolicyCoverage { .. } => "access policies",
            Invariant::Relation { .. } => "relations",
        }
    }

    /// Human-readable statement of the expected fact.
    pub fn describe(&self) -> String {
        match self {
            Invariant::Bucket {
                name,
                public,
                unrestricted_mime,
            } => {
                let mut desc = format!("bucket \"{name}\" exists");
                if let Some(p) = public {
                    desc.push_str(&format!(" with public={p}"));
                }
                if *unrestricted_mime == Some(true) {
                    desc.push_str(", all MIME types allowed");
                }
                desc
            }
            Invariant::PolicyCoverage {
                bucket,
                commands,
                schema,
                table,
            } => {
                let cmds: Vec<&str> = commands.iter().map(|c| c.as_sql()).collect();
                format!(
                    "policies on {schema}.{table} for \"{bucket}\" cover {}",
                    cmds.join(", ")
                )
            }
            Invariant::Relation { schema, name } => {
                format!("relation {schema}.{name} exists")
            }
        }
    }
}

/// The built-in `storage` battery.
///
/// Mirrors the storage end-state the stock setup changeset produces:
/// a public `documents` bucket, an unrestricted public `logos` bucket,
/// and full four-command policy coverage on `storage.objects` for
/// each.
pub fn default_battery() -> Vec<Invariant> {
    vec![
        Invariant::Bucket {
            name: "documents".to_string(),
            public: Some(true),
            unrestricted_mime: None,
        },
        Invariant::Bucket {
            name: "logos".to_string(),
            public: Some(true),
            unrestricted_mime: Some(true),
        },
        Invariant::PolicyCoverage {
            bucket: "documents".to_string(),
            commands: PolicyCommand::all().to_vec(),
            schema: default_policy_schema(),
            table: default_policy_table(),
        },
        Invariant::PolicyCoverage {
            bucket: "logos".to_string(),
            commands: PolicyCommand::all().to_vec(),
            schema: default_policy_schema(),
            table: default_policy_table(),
        },
    ]
}

/// Name under which [`default_battery`] is always available.
pub const DEFAULT_BATTERY_NAME: &str = "storage";

#[cfg(test)]
#[path = "invariant_test.rs"]
mod tests;
