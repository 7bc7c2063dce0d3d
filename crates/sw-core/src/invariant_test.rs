//! Tests for invariant battery definitions.

use crate::invariant::{default_battery, Invariant, PolicyCommand};

#[test]
fn policy_command_sql_names() {
    assert_eq!(PolicyCommand::Select.as_sql(), "SELECT");
    assert_eq!(PolicyCommand::Insert.as_sql(), "INSERT");
    assert_eq!(PolicyCommand::Update.as_sql(), "UPDATE");
    assert_eq!(PolicyCommand::Delete.as_sql(), "DELETE");
}

#[test]
fn covered_by_is_case_insensitive() {
    assert!(PolicyCommand::Select.covered_by("select"));
    assert!(PolicyCommand::Delete.covered_by("DELETE"));
    assert!(!PolicyCommand::Update.covered_by("INSERT"));
}

#[test]
fn for_all_policy_covers_every_command() {
    for cmd in PolicyCommand::all() {
        assert!(cmd.covered_by("ALL"), "{cmd} should be covered by ALL");
    }
}

#[test]
fn battery_parses_from_yaml() {
    let yaml = r#"
- kind: bucket
  name: documents
  public: false
- kind: policy_coverage
  bucket: logos
  commands: [select, insert, update, delete]
- kind: relation
  schema: public
  name: tarieven
"#;
    let battery: Vec<Invariant> = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(battery.len(), 3);

    assert_eq!(
        battery[0],
        Invariant::Bucket {
            name: "documents".to_string(),
            public: Some(false),
            unrestricted_mime: None,
        }
    );
    // Policy schema/table default to storage.objects when omitted.
    match &battery[1] {
        Invariant::PolicyCoverage {
            bucket,
            commands,
            schema,
            table,
        } => {
            assert_eq!(bucket, "logos");
            assert_eq!(commands.len(), 4);
            assert_eq!(schema, "storage");
            assert_eq!(table, "objects");
        }
        other => panic!("expected PolicyCoverage, got {other:?}"),
    }
    assert_eq!(
        battery[2],
        Invariant::Relation {
            schema: "public".to_string(),
            name: "tarieven".to_string(),
        }
    );
}

#[test]
fn describe_mentions_the_expected_fact() {
    let inv = Invariant::Bucket {
        name: "logos".to_string(),
        public: Some(true),
        unrestricted_mime: Some(true),
    };
    let desc = inv.describe();
    assert!(desc.contains("logos"));
    assert!(desc.contains("public=true"));
    assert!(desc.contains("MIME"));
}

#[test]
fn subjects_group_by_invariant_kind() {
    let battery = default_battery();
    assert_eq!(battery[0].subject(), "bucket configuration");
    assert_eq!(battery[2].subject(), "access policies");
}

#[test]
fn default_battery_covers_both_buckets() {
    let battery = default_battery();
    assert_eq!(battery.len(), 4);

    let buckets: Vec<&str> = battery
        .iter()
        .filter_map(|i| match i {
            Invariant::Bucket { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(buckets, vec!["documents", "logos"]);

    let coverage: Vec<&str> = battery
        .iter()
        .filter_map(|i| match i {
            Invariant::PolicyCoverage { bucket, .. } => Some(bucket.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(coverage, vec!["documents", "logos"]);
}
