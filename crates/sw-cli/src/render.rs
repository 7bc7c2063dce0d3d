//! Report rendering.
//!
//! Formats execution and verification outcomes into one terminal
//! summary plus a process exit code. Pure: no state is mutated and
//! nothing is printed here.

use sw_db::ExecutionResult;
use sw_verify::VerificationReport;

/// Render a phase-by-phase summary and the exit code for it.
///
/// Exit code 0 only when execution (if any) succeeded AND every
/// invariant in the report (if any) is satisfied.
pub fn render(
    execution: Option<&ExecutionResult>,
    verification: Option<(&str, &VerificationReport)>,
) -> (String, i32) {
    let mut out = String::new();

    if let Some(result) = execution {
        out.push_str("Execution\n");
        out.push_str(&format!("  mode: {}\n", result.mode));
        match &result.error {
            None => out.push_str(&format!(
                "  \u{2713} changeset applied ({} rows affected, {:.2}s)\n",
                result.rows_affected, result.duration_secs
            )),
            Some(e) => out.push_str(&format!("  \u{2717} execution failed: {e}\n")),
        }
    }

    if let Some((battery, report)) = verification {
        if execution.is_some() {
            out.push('\n');
        }
        out.push_str(&format!("Verification (battery: {battery})\n"));
        for subject in report.subjects() {
            out.push_str(&format!("  {subject}\n"));
            for check in report.checks_for(subject) {
                if check.satisfied {
                    out.push_str(&format!("    \u{2713} {}\n", check.description));
                } else {
                    out.push_str(&format!("    \u{2717} {}\n", check.description));
                    out.push_str(&format!("        observed: {}\n", check.observed));
                }
            }
        }
    }

    let exec_ok = execution.map_or(true, ExecutionResult::succeeded);
    let verify_ok = verification.map_or(true, |(_, report)| report.passed());

    let mut parts = Vec::new();
    if let Some(result) = execution {
        parts.push(
            if result.succeeded() {
                "execution ok"
            } else {
                "execution failed"
            }
            .to_string(),
        );
    }
    if let Some((_, report)) = verification {
        parts.push(format!(
            "{}/{} invariants satisfied",
            report.satisfied_count(),
            report.total()
        ));
    }
    let verdict = if exec_ok && verify_ok { "PASS" } else { "FAIL" };
    out.push_str(&format!("\nSummary: {} - {verdict}\n", parts.join(", ")));

    (out, if exec_ok && verify_ok { 0 } else { 1 })
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
