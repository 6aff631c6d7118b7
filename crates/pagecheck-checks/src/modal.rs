use crate::{visibility_expr, Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_browser::Locator;
use pagecheck_core::CheckResult;

const PORTFOLIO_SECTION: &str = "[id=\"projects\"], [id=\"portfolio\"], [id=\"case-studies\"]";
const DIALOG_CONTAINER: &str = "[class*=\"modal\"], [class*=\"Modal\"], [role=\"dialog\"]";

fn card_locator() -> Locator {
    Locator::css(&[
        "[class*=\"project\"] a[href*=\"#\"]",
        "[class*=\"project\"] button",
        "[class*=\"ProjectCard\"]",
        ".project-card",
        "[id*=\"project\"] button",
    ])
    .or_text("a", "View Details")
    .or_text("button", "View Details")
}

fn close_locator() -> Locator {
    Locator::css(&[
        "button[aria-label*=\"close\"]",
        "button[aria-label=\"Close\"]",
        "button[class*=\"close\"]",
        "[role=\"dialog\"] button",
    ])
    .or_text("button", "×")
    .or_text("button", "Close")
}

/// Opens a case-study modal from a project card and closes it again,
/// asserting computed visibility on both transitions.
pub struct ModalLifecycle;

#[async_trait]
impl Check for ModalLifecycle {
    fn name(&self) -> &'static str {
        "Modal lifecycle"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.scroll_into_view(PORTFOLIO_SECTION).await?;

        let Some(card) = card_locator().resolve(cx.probe.page()).await else {
            return Ok(vec![CheckResult::not_found(
                self.name(),
                "Project card not found",
            )]);
        };
        tracing::debug!("Project card matched by {}", card.matched_by);

        cx.shoot("before-modal").await;
        crate::click(&card.element).await?;

        let visible = cx
            .probe
            .wait_stable(&visibility_expr(DIALOG_CONTAINER))
            .await?;
        let shot_open = cx.shoot("modal-open").await;

        if visible != serde_json::Value::Bool(true) {
            return Ok(vec![CheckResult::fail(
                self.name(),
                "Modal does not open when project card clicked",
            )
            .with_screenshot(shot_open)]);
        }

        let mut results = vec![
            CheckResult::pass(self.name(), "Modal opens from project card")
                .with_screenshot(shot_open),
        ];

        let Some(close) = close_locator().resolve(cx.probe.page()).await else {
            results.push(CheckResult::warn(
                self.name(),
                "Close button not found in modal",
            ));
            return Ok(results);
        };

        crate::click(&close.element).await?;
        let still_visible = cx
            .probe
            .wait_stable(&visibility_expr(DIALOG_CONTAINER))
            .await?;
        let shot_closed = cx.shoot("modal-closed").await;

        if still_visible == serde_json::Value::Bool(true) {
            results.push(
                CheckResult::fail(self.name(), "Modal does not close when close button clicked")
                    .with_screenshot(shot_closed),
            );
        } else {
            results.push(
                CheckResult::pass(self.name(), "Modal closes via close button")
                    .with_screenshot(shot_closed),
            );
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_locator_falls_back_to_view_details_text() {
        let described: Vec<String> = card_locator()
            .matchers()
            .iter()
            .map(|m| m.describe())
            .collect();
        assert!(described.last().unwrap().contains("View Details"));
        assert!(described[0].starts_with("[class*=\"project\"]"));
    }

    #[test]
    fn test_close_locator_tries_x_then_close_text() {
        let described: Vec<String> = close_locator()
            .matchers()
            .iter()
            .map(|m| m.describe())
            .collect();
        let text_fallbacks: Vec<&String> = described
            .iter()
            .filter(|d| d.starts_with("<button>"))
            .collect();
        assert_eq!(text_fallbacks.len(), 2);
        assert!(text_fallbacks[0].contains('×'));
        assert!(text_fallbacks[1].contains("Close"));
    }
}
