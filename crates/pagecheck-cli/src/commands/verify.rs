use crate::RunOpts;
use anyhow::Result;

/// Content verification battery: expected phrases per section plus the
/// case-study modal's structured labels.
pub async fn execute(opts: &RunOpts) -> Result<i32> {
    let report = super::run_battery(
        opts,
        "Content verification",
        pagecheck_checks::verify_battery(),
        "content-report.json",
    )
    .await?;

    Ok(if report.has_failures() { 1 } else { 0 })
}
