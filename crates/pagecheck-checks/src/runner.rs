use crate::{Check, CheckContext, Result};
use pagecheck_core::{CheckResult, RunReport};

/// Executes checks strictly in sequence against the single shared page.
///
/// One check's failure never aborts the run: an `Err` is converted to a
/// `fail` result at the check boundary. Only session launch and the initial
/// navigation can abort a run, and both happen before the runner exists.
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Drive the battery to completion. Every produced result is appended to
    /// the report and handed to `on_result` for live transcript output.
    pub async fn run(
        &self,
        cx: &mut CheckContext<'_>,
        mut on_result: impl FnMut(&CheckResult),
    ) -> RunReport {
        let mut report = RunReport::new(&cx.config.base_url);

        for check in &self.checks {
            tracing::info!("Running check: {}", check.name());
            let outcome = check.run(cx).await;
            record_outcome(&mut report, check.name(), outcome, &mut on_result);
        }

        report.finalize(cx.session.console_messages());
        report
    }
}

/// Append every result a check produced to the report, announcing each one
/// through `on_result` first. The report and the transcript see the same
/// results, one for one.
fn record_outcome(
    report: &mut RunReport,
    name: &'static str,
    outcome: Result<Vec<CheckResult>>,
    on_result: &mut impl FnMut(&CheckResult),
) {
    for result in collect_outcomes(name, outcome) {
        on_result(&result);
        report.push(result);
    }
}

/// Isolation boundary: a thrown check becomes one `fail` result, and a check
/// that produced nothing still yields exactly one result.
fn collect_outcomes(name: &'static str, outcome: Result<Vec<CheckResult>>) -> Vec<CheckResult> {
    match outcome {
        Ok(results) if results.is_empty() => {
            vec![CheckResult::warn(name, "Check produced no result")]
        }
        Ok(results) => results,
        Err(e) => {
            tracing::warn!("Check '{}' aborted: {}", name, e);
            vec![CheckResult::fail(name, format!("Check aborted: {}", e))]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecheck_core::Status;

    #[test]
    fn test_error_becomes_single_fail() {
        let outcome = Err(pagecheck_browser::Error::Eval("boom".to_string()).into());
        let results = collect_outcomes("Menu toggle", outcome);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, Status::Fail);
        assert_eq!(results[0].name, "Menu toggle");
        assert!(results[0].message.contains("boom"));
    }

    #[test]
    fn test_empty_outcome_yields_one_result() {
        let results = collect_outcomes("Pagination dots", Ok(vec![]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, Status::Warn);
    }

    #[test]
    fn test_results_pass_through_unchanged() {
        let outcome = Ok(vec![
            CheckResult::pass("a", "ok"),
            CheckResult::warn("a", "hmm"),
        ]);
        let results = collect_outcomes("a", outcome);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_report_and_transcript_see_identical_results() {
        let mut report = RunReport::new("http://localhost:5173/");
        let mut transcript: Vec<(String, Status)> = Vec::new();
        let mut on_result = |r: &CheckResult| transcript.push((r.message.clone(), r.status));

        record_outcome(
            &mut report,
            "Horizontal overflow (sections)",
            Ok(vec![
                CheckResult::pass("Horizontal overflow (sections)", "Hero section fits"),
                CheckResult::fail(
                    "Horizontal overflow (sections)",
                    "Skills section overflows by 50px",
                ),
            ]),
            &mut on_result,
        );
        record_outcome(
            &mut report,
            "Menu toggle",
            Err(pagecheck_browser::Error::Eval("boom".to_string()).into()),
            &mut on_result,
        );
        record_outcome(&mut report, "Pagination dots", Ok(vec![]), &mut on_result);

        // Every emitted result reaches both the transcript and the report,
        // in the same order
        assert_eq!(transcript.len(), report.results.len());
        for (announced, recorded) in transcript.iter().zip(report.results.iter()) {
            assert_eq!(announced.0, recorded.message);
            assert_eq!(announced.1, recorded.status);
        }

        report.finalize(vec![]);
        assert_eq!(report.total_checks, 4);
        assert_eq!(report.total_issues, 3);
    }

    #[test]
    fn test_runner_reports_battery_size() {
        let runner = CheckRunner::new(crate::audit_battery());
        assert!(!runner.is_empty());
        assert_eq!(runner.len(), 12);
    }
}
