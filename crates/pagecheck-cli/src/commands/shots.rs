use crate::RunOpts;
use anyhow::Result;

/// Screenshot sweep: full-page plus per-section captures and a broken-image
/// scan. Never fails the process; the captures are the deliverable.
pub async fn execute(opts: &RunOpts) -> Result<i32> {
    super::run_battery(
        opts,
        "Screenshot sweep",
        pagecheck_checks::shots_battery(),
        "report.json",
    )
    .await?;

    Ok(0)
}
