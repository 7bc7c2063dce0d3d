//! Verification report aggregation.

/// Verdict for one invariant, with the observed catalog state that
/// justified it.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Grouping subject for rendering (e.g. "bucket configuration").
    pub subject: &'static str,
    /// The invariant's human-readable statement.
    pub description: String,
    pub satisfied: bool,
    /// Supporting rows, or a "no matching ... found" marker.
    pub observed: String,
}

/// One aggregate report per invocation.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub checks: Vec<CheckOutcome>,
}

impl VerificationReport {
    /// True only when every invariant in the battery is satisfied.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.satisfied)
    }

    pub fn satisfied_count(&self) -> usize {
        self.checks.iter().filter(|c| c.satisfied).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    /// Every unsatisfied check, in battery order.
    pub fn unsatisfied(&self) -> impl Iterator<Item = &CheckOutcome> + '_ {
        self.checks.iter().filter(|c| !c.satisfied)
    }

    /// Distinct subjects in first-appearance order, for grouped
    /// rendering.
    pub fn subjects(&self) -> Vec<&'static str> {
        let mut subjects = Vec::new();
        for check in &self.checks {
            if !subjects.contains(&check.subject) {
                subjects.push(check.subject);
            }
        }
        subjects
    }

    /// Checks under one subject, in battery order.
    pub fn checks_for<'a>(
        &'a self,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a CheckOutcome> + 'a {
        self.checks.iter().filter(move |c| c.subject == subject)
    }
}
