use crate::{visibility_expr, Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_browser::Locator;
use pagecheck_core::CheckResult;

const MENU_CONTAINER: &str = "[class*=\"mobile\"], [class*=\"Menu\"], nav [class*=\"menu\"]";

fn hamburger_locator() -> Locator {
    Locator::css(&[
        "button[aria-label*=\"menu\"]",
        "button[class*=\"hamburger\"]",
        "button[class*=\"menu\"]",
        ".mobile-menu-button",
        "[class*=\"MenuButton\"]",
        "nav button",
        "button[aria-expanded]",
    ])
}

/// Opens the mobile hamburger menu, asserts the menu container becomes
/// visible, then clicks a navigation link inside it and asserts the
/// container hides again.
pub struct MenuToggle;

#[async_trait]
impl Check for MenuToggle {
    fn name(&self) -> &'static str {
        "Menu toggle"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.scroll_to_top().await?;

        let Some(found) = hamburger_locator().resolve(cx.probe.page()).await else {
            return Ok(vec![CheckResult::not_found(
                self.name(),
                "Hamburger menu button not found",
            )]);
        };
        tracing::debug!("Hamburger matched by {}", found.matched_by);

        cx.shoot("mobile-menu-closed").await;
        crate::click(&found.element).await?;

        let visible = cx
            .probe
            .wait_stable(&visibility_expr(MENU_CONTAINER))
            .await?;
        let shot_open = cx.shoot("mobile-menu-open").await;

        if visible != serde_json::Value::Bool(true) {
            return Ok(vec![CheckResult::fail(
                self.name(),
                "Menu does not open when hamburger clicked",
            )
            .with_screenshot(shot_open)]);
        }

        let mut results = vec![
            CheckResult::pass(self.name(), "Menu opens on hamburger click")
                .with_screenshot(shot_open),
        ];

        // Clicking a nav link inside the open menu should close it
        let nav_link = Locator::css(&["nav a[href*=\"#about\"]", "nav a[href=\"#about\"]"])
            .resolve(cx.probe.page())
            .await;

        match nav_link {
            Some(link) => {
                crate::click(&link.element).await?;

                let still_visible = cx
                    .probe
                    .wait_stable(&visibility_expr(MENU_CONTAINER))
                    .await?;
                let shot_after = cx.shoot("mobile-menu-after-click").await;

                if still_visible == serde_json::Value::Bool(true) {
                    results.push(
                        CheckResult::fail(
                            self.name(),
                            "Menu does not close after clicking nav link",
                        )
                        .with_screenshot(shot_after),
                    );
                } else {
                    results.push(
                        CheckResult::pass(self.name(), "Menu closes after clicking nav link")
                            .with_screenshot(shot_after),
                    );
                }
            }
            None => {
                results.push(CheckResult::warn(
                    self.name(),
                    "Could not find nav link to test menu close",
                ));
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamburger_candidates_most_specific_first() {
        let matchers = hamburger_locator();
        let first = matchers.matchers()[0].describe();
        let last = matchers.matchers().last().unwrap().describe();
        assert_eq!(first, "button[aria-label*=\"menu\"]");
        assert_eq!(last, "button[aria-expanded]");
    }
}
