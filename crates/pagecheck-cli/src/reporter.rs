use console::style;
use pagecheck_core::{RunReport, Status};
use std::path::Path;

pub fn print_header(title: &str, url: &str) {
    println!("{}", style(format!("=== {} ===", title.to_uppercase())).bold());
    println!("Target: {}\n", url);
}

/// Live transcript line for one check result, printed as the runner
/// produces it. One line here corresponds to one entry in the JSON report.
pub fn print_result(result: &pagecheck_core::CheckResult) {
    let marker = match result.status {
        Status::Pass => style("✓").green(),
        Status::Fail => style("✗").red(),
        Status::Warn | Status::NotFound => style("⚠").yellow(),
    };
    println!("  {} [{}] {}", marker, style(&result.name).dim(), result.message);

    if result.status == Status::Fail {
        if let Some(serde_json::Value::Array(items)) = &result.details {
            for item in items {
                if let serde_json::Value::String(text) = item {
                    println!("      - {}", text);
                }
            }
        }
    }
}

pub fn print_summary(report: &RunReport, output_dir: &Path, report_path: &Path) {
    println!("\n{}", style("=".repeat(60)).dim());

    if report.total_issues == 0 {
        println!(
            "{}",
            style(format!(
                "All {} checks passed, no issues found",
                report.total_checks
            ))
            .green()
            .bold()
        );
    } else {
        println!(
            "{}",
            style(format!(
                "{} of {} results flagged issues",
                report.total_issues, report.total_checks
            ))
            .yellow()
            .bold()
        );
        for (index, result) in report
            .results
            .iter()
            .filter(|r| r.status.is_issue())
            .enumerate()
        {
            println!("  {}. [{}] {}", index + 1, result.name, result.message);
        }
    }

    println!("\nScreenshots saved to: {}", output_dir.display());
    println!("Report saved to: {}", report_path.display());
}
