pub mod carousel;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod form;
pub mod hero;
pub mod layout;
pub mod menu;
pub mod modal;
pub mod runner;
pub mod shots;

pub use error::{Error, Result};
pub use runner::CheckRunner;

use async_trait::async_trait;
use pagecheck_browser::{BrowserSession, Probe};
use pagecheck_core::{CheckResult, CheckerConfig};
use std::path::PathBuf;

/// One declarative unit of page interaction + assertion.
///
/// A check may emit several results (section sweeps, phrase batteries). An
/// `Err` from `run` is captured by the runner as a single `fail` result; it
/// never aborts the run.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>>;
}

/// Everything a check is allowed to touch: the page probe, the session's
/// diagnostic buffer, the run configuration, and the screenshot counter.
/// Owned by the runner for the whole run; checks never reach into ambient
/// state.
pub struct CheckContext<'a> {
    pub probe: &'a Probe,
    pub session: &'a BrowserSession,
    pub config: &'a CheckerConfig,
    shot_ordinal: usize,
}

impl<'a> CheckContext<'a> {
    pub fn new(probe: &'a Probe, session: &'a BrowserSession, config: &'a CheckerConfig) -> Self {
        Self {
            probe,
            session,
            config,
            shot_ordinal: 0,
        }
    }

    /// Capture the viewport under the next ordinal-prefixed name
    pub async fn shoot(&mut self, label: &str) -> Option<PathBuf> {
        self.shot_ordinal += 1;
        self.probe
            .screenshot(&self.config.output_dir, self.shot_ordinal, label)
            .await
    }

    /// Capture the full scrollable page
    pub async fn shoot_full(&mut self, label: &str) -> Option<PathBuf> {
        self.shot_ordinal += 1;
        self.probe
            .screenshot_full(&self.config.output_dir, self.shot_ordinal, label)
            .await
    }
}

/// The full acceptance battery, in execution order: console diagnostics on
/// the freshly loaded desktop page, the mobile responsive sweep, the
/// interaction checks, and a final desktop verification pass.
pub fn audit_battery() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(diagnostics::ConsoleDiagnostics),
        Box::new(layout::PageOverflow),
        Box::new(layout::SectionOverflow),
        Box::new(menu::MenuToggle),
        Box::new(modal::ModalLifecycle),
        Box::new(carousel::CarouselNav),
        Box::new(carousel::PaginationDots),
        Box::new(form::FormValidation),
        Box::new(form::FormSubmission),
        Box::new(hero::ScrollIndicator),
        Box::new(layout::ElementSweep),
        Box::new(layout::DesktopVerification),
    ]
}

/// Content verification only: expected phrases per section plus the
/// case-study modal's structured labels.
pub fn verify_battery() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(content::ContentPhrases),
        Box::new(content::ModalContent),
    ]
}

/// Screenshot sweep: full-page capture, one viewport capture per section,
/// and a broken-image scan.
pub fn shots_battery() -> Vec<Box<dyn Check>> {
    vec![Box::new(shots::ScreenshotSweep)]
}

/// Click an element, mapping the CDP error into this crate's error type
pub(crate) async fn click(element: &pagecheck_browser::Element) -> Result<()> {
    element
        .click()
        .await
        .map_err(|e| pagecheck_browser::Error::Cdp(e.to_string()))?;
    Ok(())
}

/// Expression evaluating to true when the first element matching any of the
/// comma-joined selectors is visibly rendered (display/visibility/opacity).
pub(crate) fn visibility_expr(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({sel}); \
         if (!el) return false; \
         const style = window.getComputedStyle(el); \
         return style.display !== 'none' && style.visibility !== 'hidden' && style.opacity !== '0'; }})()",
        sel = pagecheck_browser::js_string(selector)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_battery_order() {
        let names: Vec<&str> = audit_battery().iter().map(|c| c.name()).collect();
        assert_eq!(names.first(), Some(&"Console diagnostics"));
        assert_eq!(names.last(), Some(&"Desktop verification"));
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn test_verify_battery_is_content_only() {
        let names: Vec<&str> = verify_battery().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Content phrases", "Case-study modal content"]);
    }
}
