use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_browser::{js_string, Probe};
use pagecheck_core::{CheckResult, PageSection};
use serde::Deserialize;

/// Right-edge tolerance before an element counts as overflowing the
/// viewport, in logical pixels
const OVERFLOW_TOLERANCE_PX: i64 = 10;

#[derive(Debug, Deserialize)]
struct ScrollMetrics {
    #[serde(rename = "scrollWidth")]
    scroll_width: i64,
    #[serde(rename = "clientWidth")]
    client_width: i64,
}

/// Horizontal overflow in pixels, zero when content fits
fn overflow_delta(scroll_width: i64, client_width: i64) -> i64 {
    (scroll_width - client_width).max(0)
}

async fn document_metrics(probe: &Probe) -> Result<ScrollMetrics> {
    Ok(probe
        .eval(
            "(() => ({ scrollWidth: document.documentElement.scrollWidth, \
             clientWidth: document.documentElement.clientWidth }))()",
        )
        .await?)
}

/// Pick the first selector candidate that matches anything in the live DOM
async fn resolve_section_selector(
    probe: &Probe,
    section: &PageSection,
) -> Result<Option<&'static str>> {
    for selector in section.selectors {
        let expr = format!(
            "!!document.querySelector({sel})",
            sel = js_string(selector)
        );
        if probe.eval::<bool>(&expr).await? {
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

/// Whole-document horizontal overflow at the mobile breakpoint
pub struct PageOverflow;

#[async_trait]
impl Check for PageOverflow {
    fn name(&self) -> &'static str {
        "Horizontal overflow (page)"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.set_viewport(cx.config.mobile).await?;
        let shot = cx.shoot("mobile-hero").await;

        let metrics = document_metrics(cx.probe).await?;
        let delta = overflow_delta(metrics.scroll_width, metrics.client_width);

        let result = if delta > 0 {
            CheckResult::fail(
                self.name(),
                format!("Horizontal scrollbar present, overflow {}px", delta),
            )
            .with_details(serde_json::json!({
                "scrollWidth": metrics.scroll_width,
                "clientWidth": metrics.client_width,
                "overflow": delta,
            }))
        } else {
            CheckResult::pass(self.name(), "No horizontal scrollbar on mobile")
        };

        Ok(vec![result.with_screenshot(shot)])
    }
}

/// Scrolls each named section into view on mobile and compares its scroll
/// width against its client width; every section gets a screenshot.
pub struct SectionOverflow;

#[async_trait]
impl Check for SectionOverflow {
    fn name(&self) -> &'static str {
        "Horizontal overflow (sections)"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        let mut results = Vec::new();

        for section in PageSection::standard() {
            let Some(selector) = resolve_section_selector(cx.probe, &section).await? else {
                results.push(CheckResult::not_found(
                    self.name(),
                    format!("{} section not found", section.name),
                ));
                continue;
            };

            cx.probe.scroll_into_view(selector).await?;

            let expr = format!(
                "(() => {{ const el = document.querySelector({sel}); \
                 return {{ scrollWidth: el.scrollWidth, clientWidth: el.clientWidth }}; }})()",
                sel = js_string(selector)
            );
            let metrics: ScrollMetrics = cx.probe.eval(&expr).await?;
            let delta = overflow_delta(metrics.scroll_width, metrics.client_width);

            let label = format!("mobile-{}", section.name.to_lowercase());
            let shot = cx.shoot(&label).await;

            if delta > 0 {
                results.push(
                    CheckResult::fail(
                        self.name(),
                        format!("{} section overflows by {}px", section.name, delta),
                    )
                    .with_details(serde_json::json!({
                        "section": section.name,
                        "scrollWidth": metrics.scroll_width,
                        "clientWidth": metrics.client_width,
                        "overflow": delta,
                    }))
                    .with_screenshot(shot),
                );
            } else {
                results.push(
                    CheckResult::pass(self.name(), format!("{} section fits", section.name))
                        .with_screenshot(shot),
                );
            }
        }

        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct SweepIssue {
    #[serde(rename = "type")]
    kind: String,
    element: String,
    details: String,
}

/// Mobile sweep over every element: bounding boxes past the viewport's right
/// edge are failures; hidden-overflow truncation is informational.
pub struct ElementSweep;

#[async_trait]
impl Check for ElementSweep {
    fn name(&self) -> &'static str {
        "Element overflow (mobile sweep)"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.set_viewport(cx.config.mobile).await?;
        cx.probe.scroll_to_top().await?;

        let expr = format!(
            "(() => {{ const issues = []; \
             document.querySelectorAll('*').forEach(el => {{ \
               const style = window.getComputedStyle(el); \
               const rect = el.getBoundingClientRect(); \
               const tag = el.tagName + (el.id ? '#' + el.id : '') + \
                 (el.className && el.className.split ? '.' + el.className.split(' ')[0] : ''); \
               if (rect.right > window.innerWidth + {tol}) {{ \
                 issues.push({{ type: 'overflow', element: tag, \
                   details: Math.round(rect.right - window.innerWidth) + 'px beyond viewport' }}); \
               }} \
               if (style.overflow === 'hidden' && el.scrollWidth > el.clientWidth) {{ \
                 issues.push({{ type: 'truncation', element: tag, details: 'content truncated' }}); \
               }} \
             }}); \
             return issues; }})()",
            tol = OVERFLOW_TOLERANCE_PX
        );

        let issues: Vec<SweepIssue> = cx.probe.eval(&expr).await?;
        let overflows: Vec<&SweepIssue> = issues.iter().filter(|i| i.kind == "overflow").collect();
        let truncations: Vec<&SweepIssue> =
            issues.iter().filter(|i| i.kind == "truncation").collect();

        let mut results = Vec::new();

        if overflows.is_empty() {
            results.push(CheckResult::pass(
                self.name(),
                "No element extends beyond the mobile viewport",
            ));
        } else {
            results.push(
                CheckResult::fail(
                    self.name(),
                    format!("{} element(s) extend beyond the viewport", overflows.len()),
                )
                .with_details(serde_json::json!(overflows
                    .iter()
                    .map(|i| format!("{}: {}", i.element, i.details))
                    .collect::<Vec<_>>())),
            );
        }

        if !truncations.is_empty() {
            results.push(
                CheckResult::warn(
                    self.name(),
                    format!("{} element(s) truncate their content", truncations.len()),
                )
                .with_details(serde_json::json!(truncations
                    .iter()
                    .map(|i| i.element.clone())
                    .collect::<Vec<_>>())),
            );
        }

        Ok(results)
    }
}

/// Final pass: switch back to desktop, re-check document overflow, and
/// capture one screenshot per section
pub struct DesktopVerification;

#[async_trait]
impl Check for DesktopVerification {
    fn name(&self) -> &'static str {
        "Desktop verification"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.set_viewport(cx.config.desktop).await?;
        cx.probe.scroll_to_top().await?;
        let shot = cx.shoot("desktop-final-hero").await;

        let metrics = document_metrics(cx.probe).await?;
        let delta = overflow_delta(metrics.scroll_width, metrics.client_width);

        let mut results = Vec::new();
        if delta > 0 {
            results.push(
                CheckResult::fail(
                    self.name(),
                    format!("Desktop horizontal scrollbar, overflow {}px", delta),
                )
                .with_screenshot(shot),
            );
        } else {
            results.push(
                CheckResult::pass(self.name(), "No horizontal scrollbar on desktop")
                    .with_screenshot(shot),
            );
        }

        for section in PageSection::standard() {
            if let Some(selector) = resolve_section_selector(cx.probe, &section).await? {
                cx.probe.scroll_into_view(selector).await?;
                cx.shoot(&format!("desktop-{}", section.name.to_lowercase()))
                    .await;
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_delta_flags_exact_excess() {
        // synthetic div 50px wider than the 375px mobile viewport
        assert_eq!(overflow_delta(425, 375), 50);
    }

    #[test]
    fn test_overflow_delta_zero_when_fitting() {
        assert_eq!(overflow_delta(375, 375), 0);
        assert_eq!(overflow_delta(360, 375), 0);
    }

    #[test]
    fn test_sweep_issue_parses_page_payload() {
        let raw = serde_json::json!([
            { "type": "overflow", "element": "DIV#wide.card", "details": "50px beyond viewport" },
            { "type": "truncation", "element": "P#bio", "details": "content truncated" }
        ]);
        let issues: Vec<SweepIssue> = serde_json::from_value(raw).unwrap();
        assert_eq!(issues[0].kind, "overflow");
        assert_eq!(issues[1].element, "P#bio");
    }
}
