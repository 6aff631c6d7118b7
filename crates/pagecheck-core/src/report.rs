use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Maximum number of diagnostic-channel messages retained in a report
pub const MAX_CONSOLE_MESSAGES: usize = 50;

/// Outcome category of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pass,
    Fail,
    Warn,
    /// No selector candidate or text fallback resolved the target element.
    /// Warning-class, never a crash.
    NotFound,
}

impl Status {
    /// True for every status that counts toward the run's issue total
    pub fn is_issue(&self) -> bool {
        !matches!(self, Status::Pass)
    }
}

/// Recorded outcome of one check execution. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Pass, message)
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Fail, message)
    }

    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::Warn, message)
    }

    pub fn not_found(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, Status::NotFound, message)
    }

    fn new(name: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            details: None,
            screenshot: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_screenshot(mut self, path: Option<PathBuf>) -> Self {
        self.screenshot = path;
        self
    }
}

/// Severity of a message on the page's diagnostic channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Error,
    Warning,
    Info,
    Log,
}

/// One captured console/page-error/failed-request message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub text: String,
}

/// Full structured record of one checker run.
///
/// Owned exclusively by the runner while checks execute; the reporter only
/// sees it after finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of when the run started
    pub timestamp: String,
    pub base_url: String,
    pub total_checks: usize,
    pub total_issues: usize,
    pub results: Vec<CheckResult>,
    pub console_messages: Vec<ConsoleMessage>,
}

impl RunReport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            base_url: base_url.into(),
            total_checks: 0,
            total_issues: 0,
            results: Vec::new(),
            console_messages: Vec::new(),
        }
    }

    pub fn push(&mut self, result: CheckResult) {
        self.results.push(result);
    }

    /// Compute totals and cap the diagnostic log. Call once, at run end.
    pub fn finalize(&mut self, console_messages: Vec<ConsoleMessage>) {
        self.total_checks = self.results.len();
        self.total_issues = self.results.iter().filter(|r| r.status.is_issue()).count();
        self.console_messages = console_messages;
        self.console_messages.truncate(MAX_CONSOLE_MESSAGES);
    }

    /// True when at least one result is a hard failure
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.status == Status::Fail)
    }
}

pub struct ReportWriter;

impl ReportWriter {
    /// Write a run report to a file as pretty-printed JSON
    pub fn to_file(report: &RunReport, path: &Path) -> Result<()> {
        tracing::debug!("Writing report to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;

        tracing::info!(
            "Wrote report with {} results to {}",
            report.results.len(),
            path.display()
        );

        Ok(())
    }

    /// Convert a run report to a JSON string
    pub fn to_string(report: &RunReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::NotFound).unwrap(),
            "\"not-found\""
        );
        assert_eq!(serde_json::to_string(&Status::Pass).unwrap(), "\"pass\"");
    }

    #[test]
    fn test_issue_statuses() {
        assert!(!Status::Pass.is_issue());
        assert!(Status::Fail.is_issue());
        assert!(Status::Warn.is_issue());
        assert!(Status::NotFound.is_issue());
    }

    #[test]
    fn test_report_pretty_prints_as_json() {
        let mut report = RunReport::new("http://localhost:5173/");
        report.push(CheckResult::warn("Scroll indicator", "not animated"));
        report.finalize(vec![]);

        let rendered = ReportWriter::to_string(&report).unwrap();
        assert!(rendered.contains("\"base_url\": \"http://localhost:5173/\""));
        assert!(rendered.contains("\"status\": \"warn\""));
    }

    #[test]
    fn test_finalize_counts_issues() {
        let mut report = RunReport::new("http://localhost:5173/");
        report.push(CheckResult::pass("a", "ok"));
        report.push(CheckResult::fail("b", "broken"));
        report.push(CheckResult::warn("c", "maybe"));
        report.push(CheckResult::not_found("d", "missing"));
        report.finalize(vec![]);

        assert_eq!(report.total_checks, 4);
        assert_eq!(report.total_issues, 3);
        assert!(report.has_failures());
    }

    #[test]
    fn test_finalize_caps_console_messages() {
        let mut report = RunReport::new("http://localhost:5173/");
        let messages = (0..80)
            .map(|i| ConsoleMessage {
                level: ConsoleLevel::Log,
                text: format!("message {}", i),
            })
            .collect();
        report.finalize(messages);

        assert_eq!(report.console_messages.len(), MAX_CONSOLE_MESSAGES);
        assert_eq!(report.console_messages[0].text, "message 0");
    }

    #[test]
    fn test_report_round_trips_to_file() {
        let mut report = RunReport::new("http://localhost:5173/");
        report.push(
            CheckResult::fail("Console diagnostics", "1 console error")
                .with_details(serde_json::json!(["TypeError: boom"])),
        );
        report.finalize(vec![ConsoleMessage {
            level: ConsoleLevel::Error,
            text: "TypeError: boom".to_string(),
        }]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        ReportWriter::to_file(&report, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: RunReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.total_checks, 1);
        assert_eq!(parsed.total_issues, 1);
        assert_eq!(parsed.results[0].status, Status::Fail);
        assert_eq!(parsed.console_messages[0].text, "TypeError: boom");
    }
}
