use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_core::{CheckResult, ConsoleLevel};

/// Inspects the diagnostic channel captured since page load. Error-level
/// entries (console errors, uncaught page errors, failed requests) are a
/// hard failure; warnings are reported separately and softly.
pub struct ConsoleDiagnostics;

#[async_trait]
impl Check for ConsoleDiagnostics {
    fn name(&self) -> &'static str {
        "Console diagnostics"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        let shot = cx.shoot("desktop-initial").await;
        let messages = cx.session.console_messages();

        let errors: Vec<String> = messages
            .iter()
            .filter(|m| m.level == ConsoleLevel::Error)
            .map(|m| m.text.clone())
            .collect();
        let warnings: Vec<String> = messages
            .iter()
            .filter(|m| m.level == ConsoleLevel::Warning)
            .map(|m| m.text.clone())
            .collect();

        let mut results = Vec::new();

        if errors.is_empty() {
            results.push(
                CheckResult::pass(self.name(), "No console errors").with_screenshot(shot),
            );
        } else {
            results.push(
                CheckResult::fail(
                    self.name(),
                    format!("{} console error(s) during load", errors.len()),
                )
                .with_details(serde_json::json!(errors))
                .with_screenshot(shot),
            );
        }

        if !warnings.is_empty() {
            results.push(
                CheckResult::warn(
                    self.name(),
                    format!("{} console warning(s) during load", warnings.len()),
                )
                .with_details(serde_json::json!(warnings)),
            );
        }

        Ok(results)
    }
}
