use crate::RunOpts;
use anyhow::Result;

/// Full acceptance battery. Exit code 1 when any check hard-fails;
/// warnings and not-found results do not fail the process.
pub async fn execute(opts: &RunOpts) -> Result<i32> {
    let report = super::run_battery(
        opts,
        "QA audit",
        pagecheck_checks::audit_battery(),
        "report.json",
    )
    .await?;

    Ok(if report.has_failures() { 1 } else { 0 })
}
