//! Battery evaluation.
//!
//! One read-only catalog query per invariant, strictly sequential.
//! Invariants are independent, so evaluation order never changes a
//! verdict, and the engine is fail-open across the battery: it records
//! every unsatisfied invariant and keeps going, failing closed only in
//! the report's final pass/fail summary.

use crate::error::VerifyResult;
use crate::report::{CheckOutcome, VerificationReport};
use sw_core::{Invariant, PolicyCommand};
use sw_db::{Catalog, PolicyRow};

/// Evaluate `battery` against `catalog` and aggregate one report.
///
/// The catalog handle must be a fresh read path opened after the
/// executor's connection closed, so every check observes committed
/// state.
pub async fn verify(
    catalog: &dyn Catalog,
    battery: &[Invariant],
) -> VerifyResult<VerificationReport> {
    let mut report = VerificationReport::default();
    for invariant in battery {
        let outcome = check(catalog, invariant).await?;
        if !outcome.satisfied {
            log::debug!("Invariant unsatisfied: {}", outcome.description);
        }
        report.checks.push(outcome);
    }
    Ok(report)
}

async fn check(catalog: &dyn Catalog, invariant: &Invariant) -> VerifyResult<CheckOutcome> {
    let (satisfied, observed) = match invariant {
        Invariant::Bucket {
            name,
            public,
            unrestricted_mime,
        } => match catalog.bucket(name).await? {
            None => (false, "no matching bucket found".to_string()),
            Some(row) => {
                // The public flag is compared by strict boolean
                // equality; absence of an expectation checks existence
                // only.
                let public_ok = public.map_or(true, |expected| row.public == expected);
                let mime_ok = *unrestricted_mime != Some(true) || row.allowed_mime_types.is_none();
                (
                    public_ok && mime_ok,
                    format!("public={}, {}", row.public, row.mime_status()),
                )
            }
        },

        Invariant::PolicyCoverage {
            bucket,
            commands,
            schema,
            table,
        } => {
            let rows = catalog.policies(schema, table, bucket).await?;
            if rows.is_empty() {
                (false, "no matching policy found".to_string())
            } else {
                let missing: Vec<&PolicyCommand> = commands
                    .iter()
                    .filter(|cmd| !rows.iter().any(|row| cmd.covered_by(&row.command)))
                    .collect();
                let mut observed = describe_policies(&rows);
                if !missing.is_empty() {
                    let names: Vec<&str> = missing.iter().map(|c| c.as_sql()).collect();
                    observed.push_str(&format!("; missing: {}", names.join(", ")));
                }
                (missing.is_empty(), observed)
            }
        }

        Invariant::Relation { schema, name } => {
            if catalog.relation_exists(schema, name).await? {
                (true, format!("{schema}.{name} present"))
            } else {
                (false, "no matching relation found".to_string())
            }
        }
    };

    Ok(CheckOutcome {
        subject: invariant.subject(),
        description: invariant.describe(),
        satisfied,
        observed,
    })
}

fn describe_policies(rows: &[PolicyRow]) -> String {
    let pairs: Vec<String> = rows
        .iter()
        .map(|row| format!("{}: {}", row.command, row.name))
        .collect();
    pairs.join("; ")
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
