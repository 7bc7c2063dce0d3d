//! Tests for battery evaluation over an in-memory catalog.

use crate::engine::verify;
use crate::error::VerifyError;
use async_trait::async_trait;
use sw_core::{Invariant, PolicyCommand};
use sw_db::{BucketRow, Catalog, DbError, DbResult, PolicyRow};

/// In-memory catalog holding everything on `storage.objects`.
#[derive(Default)]
struct FakeCatalog {
    buckets: Vec<BucketRow>,
    policies: Vec<PolicyRow>,
    relations: Vec<(String, String)>,
    fail: bool,
}

impl FakeCatalog {
    fn with_bucket(mut self, name: &str, public: bool, mime: Option<Vec<String>>) -> Self {
        self.buckets.push(BucketRow {
            name: name.to_string(),
            public,
            allowed_mime_types: mime,
        });
        self
    }

    fn with_policy(mut self, name: &str, command: &str) -> Self {
        self.policies.push(PolicyRow {
            name: name.to_string(),
            command: command.to_string(),
        });
        self
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn bucket(&self, name: &str) -> DbResult<Option<BucketRow>> {
        if self.fail {
            return Err(DbError::QueryError("storage.buckets: gone".to_string()));
        }
        Ok(self.buckets.iter().find(|b| b.name == name).cloned())
    }

    async fn policies(
        &self,
        _schema: &str,
        _table: &str,
        name_fragment: &str,
    ) -> DbResult<Vec<PolicyRow>> {
        if self.fail {
            return Err(DbError::QueryError("pg_policies: gone".to_string()));
        }
        let fragment = name_fragment.to_lowercase();
        Ok(self
            .policies
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }

    async fn relation_exists(&self, schema: &str, name: &str) -> DbResult<bool> {
        if self.fail {
            return Err(DbError::QueryError(
                "information_schema.tables: gone".to_string(),
            ));
        }
        Ok(self
            .relations
            .iter()
            .any(|(s, n)| s == schema && n == name))
    }
}

fn bucket(name: &str, public: Option<bool>) -> Invariant {
    Invariant::Bucket {
        name: name.to_string(),
        public,
        unrestricted_mime: None,
    }
}

fn coverage(bucket: &str, commands: &[PolicyCommand]) -> Invariant {
    Invariant::PolicyCoverage {
        bucket: bucket.to_string(),
        commands: commands.to_vec(),
        schema: "storage".to_string(),
        table: "objects".to_string(),
    }
}

// Two buckets with opposite public flags, both checked by strict
// boolean equality.
#[tokio::test]
async fn bucket_flags_verified_by_strict_equality() {
    let catalog = FakeCatalog::default()
        .with_bucket("documents", false, None)
        .with_bucket("logos", true, None);
    let battery = vec![
        bucket("documents", Some(false)),
        bucket("logos", Some(true)),
    ];

    let report = verify(&catalog, &battery).await.unwrap();

    assert!(report.passed());
    assert_eq!(report.satisfied_count(), 2);
}

#[tokio::test]
async fn wrong_public_flag_is_unsatisfied_with_observed_value() {
    let catalog = FakeCatalog::default().with_bucket("documents", true, None);
    let battery = vec![bucket("documents", Some(false))];

    let report = verify(&catalog, &battery).await.unwrap();

    assert!(!report.passed());
    let check = &report.checks[0];
    assert!(check.observed.contains("public=true"));
}

#[tokio::test]
async fn missing_bucket_reports_no_match() {
    let catalog = FakeCatalog::default();
    let report = verify(&catalog, &[bucket("documents", None)]).await.unwrap();

    assert!(!report.passed());
    assert_eq!(report.checks[0].observed, "no matching bucket found");
}

#[tokio::test]
async fn mime_restriction_fails_unrestricted_requirement() {
    let catalog = FakeCatalog::default().with_bucket(
        "logos",
        true,
        Some(vec!["image/png".to_string(), "image/svg+xml".to_string()]),
    );
    let battery = vec![Invariant::Bucket {
        name: "logos".to_string(),
        public: Some(true),
        unrestricted_mime: Some(true),
    }];

    let report = verify(&catalog, &battery).await.unwrap();

    assert!(!report.passed());
    assert!(report.checks[0].observed.contains("restricted: image/png"));
}

#[tokio::test]
async fn suffixed_policy_names_still_count_as_coverage() {
    // Generated suffixes on policy names must not defeat matching; the
    // allow-listed command kind is what counts.
    let catalog = FakeCatalog::default()
        .with_policy("documents_select_policy_1a2b", "SELECT")
        .with_policy("documents_insert_policy_3c4d", "INSERT")
        .with_policy("documents_update_policy_5e6f", "UPDATE")
        .with_policy("documents_delete_policy_7g8h", "DELETE");
    let battery = vec![coverage("documents", &PolicyCommand::all())];

    let report = verify(&catalog, &battery).await.unwrap();
    assert!(report.passed());
}

#[tokio::test]
async fn for_all_policy_covers_every_required_command() {
    let catalog = FakeCatalog::default().with_policy("logos_full_access", "ALL");
    let battery = vec![coverage("logos", &PolicyCommand::all())];

    let report = verify(&catalog, &battery).await.unwrap();
    assert!(report.passed());
}

// A changeset that omits one required policy: that invariant is
// unsatisfied with the no-match marker; all others stay correctly
// satisfied.
#[tokio::test]
async fn missing_policy_reports_no_match_and_others_stay_satisfied() {
    let catalog = FakeCatalog::default()
        .with_bucket("documents", true, None)
        .with_policy("logos_read", "SELECT");
    let battery = vec![
        bucket("documents", Some(true)),
        coverage("documents", &[PolicyCommand::Delete]),
        coverage("logos", &[PolicyCommand::Select]),
    ];

    let report = verify(&catalog, &battery).await.unwrap();

    assert!(!report.passed());
    assert_eq!(report.satisfied_count(), 2);
    let failed: Vec<_> = report.unsatisfied().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].observed, "no matching policy found");
}

#[tokio::test]
async fn partial_coverage_lists_missing_commands() {
    let catalog = FakeCatalog::default()
        .with_policy("documents_read", "SELECT")
        .with_policy("documents_write", "INSERT");
    let battery = vec![coverage("documents", &PolicyCommand::all())];

    let report = verify(&catalog, &battery).await.unwrap();

    assert!(!report.passed());
    let observed = &report.checks[0].observed;
    assert!(observed.contains("missing: UPDATE, DELETE"), "{observed}");
    assert!(observed.contains("SELECT: documents_read"));
}

// Verification independence: an early unsatisfied invariant never
// aborts the rest of the battery.
#[tokio::test]
async fn unsatisfied_invariant_does_not_abort_the_battery() {
    let catalog = FakeCatalog::default().with_bucket("logos", true, None);
    let battery = vec![bucket("missing_bucket", None), bucket("logos", Some(true))];

    let report = verify(&catalog, &battery).await.unwrap();

    assert_eq!(report.total(), 2);
    assert!(!report.checks[0].satisfied);
    assert!(report.checks[1].satisfied);
}

#[tokio::test]
async fn relation_checks_use_schema_and_name() {
    let mut catalog = FakeCatalog::default();
    catalog
        .relations
        .push(("public".to_string(), "tarieven".to_string()));
    let battery = vec![
        Invariant::Relation {
            schema: "public".to_string(),
            name: "tarieven".to_string(),
        },
        Invariant::Relation {
            schema: "public".to_string(),
            name: "absent".to_string(),
        },
    ];

    let report = verify(&catalog, &battery).await.unwrap();

    assert!(report.checks[0].satisfied);
    assert!(!report.checks[1].satisfied);
    assert_eq!(report.checks[1].observed, "no matching relation found");
}

#[tokio::test]
async fn catalog_failure_is_an_error_not_a_verdict() {
    let catalog = FakeCatalog {
        fail: true,
        ..FakeCatalog::default()
    };
    let err = verify(&catalog, &[bucket("documents", None)])
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::Catalog(_)));
    assert!(err.to_string().starts_with("[V001]"));
}

#[tokio::test]
async fn subjects_group_in_first_appearance_order() {
    let catalog = FakeCatalog::default()
        .with_bucket("documents", true, None)
        .with_policy("documents_read", "SELECT");
    let battery = vec![
        bucket("documents", Some(true)),
        coverage("documents", &[PolicyCommand::Select]),
    ];

    let report = verify(&catalog, &battery).await.unwrap();
    assert_eq!(
        report.subjects(),
        vec!["bucket configuration", "access policies"]
    );
}
