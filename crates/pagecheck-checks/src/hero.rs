use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_core::CheckResult;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IndicatorState {
    found: bool,
    #[serde(default, rename = "hasAnimation")]
    has_animation: bool,
    #[serde(default, rename = "hasIcon")]
    has_icon: bool,
}

/// Looks for the hero's scroll-down affordance: an anchor to `#about` (or a
/// scroll/arrow-classed element) in the top viewport, expected to carry a
/// non-static animation or transform.
pub struct ScrollIndicator;

#[async_trait]
impl Check for ScrollIndicator {
    fn name(&self) -> &'static str {
        "Scroll indicator"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.scroll_to_top().await?;
        let shot = cx.shoot("hero-scroll-indicator").await;

        let state: IndicatorState = cx
            .probe
            .eval(
                "(() => { \
                 const hero = document.querySelector('#hero, header, section:first-of-type'); \
                 const anchor = hero ? hero.querySelector('a[href=\"#about\"]') : null; \
                 const candidates = anchor ? [anchor] : Array.from( \
                   document.querySelectorAll('[class*=\"scroll\"], [class*=\"arrow-down\"], svg[class*=\"animate\"]')); \
                 for (const el of candidates) { \
                   const rect = el.getBoundingClientRect(); \
                   if (rect.top <= 0 || rect.top >= window.innerHeight) continue; \
                   const style = window.getComputedStyle(el); \
                   const hasAnimation = style.animation !== 'none' || \
                     style.transform !== 'none' || \
                     el.classList.toString().includes('animate'); \
                   return { found: true, hasAnimation, hasIcon: el.querySelector('svg') !== null }; \
                 } \
                 return { found: false, hasAnimation: false, hasIcon: false }; })()",
            )
            .await?;

        let result = if !state.found {
            CheckResult::warn(self.name(), "Scroll indicator not found in hero section")
        } else if state.has_animation {
            CheckResult::pass(self.name(), "Scroll indicator present and animated")
                .with_details(serde_json::json!({ "hasIcon": state.has_icon }))
        } else {
            CheckResult::warn(self.name(), "Scroll indicator present but not animated")
        };

        Ok(vec![result.with_screenshot(shot)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_state_parses_page_payload() {
        let state: IndicatorState = serde_json::from_value(serde_json::json!({
            "found": true, "hasAnimation": false, "hasIcon": true
        }))
        .unwrap();
        assert!(state.found);
        assert!(!state.has_animation);
        assert!(state.has_icon);
    }

    #[test]
    fn test_indicator_state_defaults_when_absent() {
        let state: IndicatorState =
            serde_json::from_value(serde_json::json!({ "found": false })).unwrap();
        assert!(!state.found);
        assert!(!state.has_animation);
    }
}
