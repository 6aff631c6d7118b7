pub mod audit;
pub mod shots;
pub mod verify;

use crate::reporter;
use crate::RunOpts;
use anyhow::{Context, Result};
use pagecheck_browser::{BrowserSession, Probe};
use pagecheck_checks::{Check, CheckContext, CheckRunner};
use pagecheck_core::{CheckerConfig, ReportWriter, RunReport};

/// Launch a session, navigate, drive a battery to completion, and persist
/// the report. The session is closed on every exit path, including fatal
/// navigation errors.
pub(crate) async fn run_battery(
    opts: &RunOpts,
    title: &str,
    checks: Vec<Box<dyn Check>>,
    report_file: &str,
) -> Result<RunReport> {
    let config = opts.to_config()?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    reporter::print_header(title, &config.base_url);

    // Session launch failure is fatal; nothing to clean up yet
    let session = BrowserSession::launch(&config)
        .await
        .context("Failed to start browser session")?;

    let probe = Probe::new(session.page().clone(), &config);
    let report = match drive(&session, &probe, &config, checks).await {
        Ok(report) => {
            close_session(session).await;
            report
        }
        Err(e) => {
            // Fatal before any check ran; still tear the browser down
            close_session(session).await;
            return Err(e);
        }
    };

    let report_path = config.output_dir.join(report_file);
    ReportWriter::to_file(&report, &report_path)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    reporter::print_summary(&report, &config.output_dir, &report_path);
    Ok(report)
}

async fn drive(
    session: &BrowserSession,
    probe: &Probe,
    config: &CheckerConfig,
    checks: Vec<Box<dyn Check>>,
) -> Result<RunReport> {
    // Initial load happens at the desktop breakpoint; failure here aborts
    // the whole run as a single fatal issue
    probe.set_viewport(config.desktop).await?;
    probe
        .goto(&config.base_url)
        .await
        .with_context(|| format!("Initial navigation to {} failed", config.base_url))?;

    let runner = CheckRunner::new(checks);
    let mut cx = CheckContext::new(probe, session, config);
    Ok(runner.run(&mut cx, reporter::print_result).await)
}

async fn close_session(session: BrowserSession) {
    if let Err(e) = session.close().await {
        tracing::warn!("Browser teardown failed: {}", e);
    }
}
