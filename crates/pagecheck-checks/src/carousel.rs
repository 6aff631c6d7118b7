use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_browser::{Element, Locator};
use pagecheck_core::CheckResult;

const TESTIMONIALS_SECTION: &str = "[id=\"testimonials\"]";
const CAROUSEL_TEXT: &str = "[id=\"testimonials\"] p, [class*=\"testimonial\"] p";
const CAROUSEL_BUTTONS: &str = "[id=\"testimonials\"] button, [class*=\"testimonial\"] button";

/// A carousel control resolved either through its locator or by position
struct Control {
    element: Element,
    /// Positional guesses carry an ambiguity annotation and downgrade the
    /// outcome to warn
    ambiguous: bool,
}

async fn find_control(
    cx: &CheckContext<'_>,
    locator: Locator,
    positional_index: usize,
) -> Option<Control> {
    if let Some(found) = locator.resolve(cx.probe.page()).await {
        return Some(Control {
            element: found.element,
            ambiguous: false,
        });
    }

    // Positional fallback: assume first button is prev, second is next
    let buttons = cx
        .probe
        .page()
        .find_elements(CAROUSEL_BUTTONS)
        .await
        .unwrap_or_default();
    if buttons.len() >= 2 {
        return buttons.into_iter().nth(positional_index).map(|element| Control {
            element,
            ambiguous: true,
        });
    }
    None
}

async fn carousel_text(cx: &CheckContext<'_>) -> Result<Option<String>> {
    let expr = format!(
        "(() => {{ const el = document.querySelector({sel}); \
         return el ? el.textContent : null; }})()",
        sel = pagecheck_browser::js_string(CAROUSEL_TEXT)
    );
    Ok(cx.probe.eval(&expr).await?)
}

/// Clicks the next and prev arrows of the testimonial carousel. A changed
/// testimonial text after "next" is the pass signal; unchanged content is
/// informational, since a single-item carousel is legal.
pub struct CarouselNav;

#[async_trait]
impl Check for CarouselNav {
    fn name(&self) -> &'static str {
        "Carousel navigation"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.scroll_into_view(TESTIMONIALS_SECTION).await?;
        cx.shoot("testimonials-initial").await;

        let initial = carousel_text(cx).await?;
        let mut results = Vec::new();

        let next = find_control(
            cx,
            Locator::css(&["button[aria-label*=\"next\"]", "button[class*=\"next\"]"]),
            1,
        )
        .await;

        match next {
            Some(control) => {
                crate::click(&control.element).await?;
                cx.probe.settle().await;
                let shot = cx.shoot("testimonials-after-next").await;
                let after = carousel_text(cx).await?;

                let changed = after.is_some() && after != initial;
                results.push(match (changed, control.ambiguous) {
                    (true, false) => {
                        CheckResult::pass(self.name(), "Next arrow advances the carousel")
                            .with_screenshot(shot)
                    }
                    (true, true) => CheckResult::warn(
                        self.name(),
                        "Carousel advanced, but next arrow was an ambiguous match (assumed second button)",
                    )
                    .with_screenshot(shot),
                    (false, _) => CheckResult::warn(
                        self.name(),
                        "Next arrow clicked but content did not change (possibly a single testimonial)",
                    )
                    .with_screenshot(shot),
                });
            }
            None => {
                results.push(CheckResult::not_found(
                    self.name(),
                    "Next arrow button not found",
                ));
            }
        }

        let prev = find_control(
            cx,
            Locator::css(&["button[aria-label*=\"prev\"]", "button[class*=\"prev\"]"]),
            0,
        )
        .await;

        match prev {
            Some(control) => {
                crate::click(&control.element).await?;
                cx.probe.settle().await;
                let shot = cx.shoot("testimonials-after-prev").await;
                results.push(if control.ambiguous {
                    CheckResult::warn(
                        self.name(),
                        "Prev arrow clicked, but it was an ambiguous match (assumed first button)",
                    )
                    .with_screenshot(shot)
                } else {
                    CheckResult::pass(self.name(), "Prev arrow is clickable").with_screenshot(shot)
                });
            }
            None => {
                results.push(CheckResult::not_found(
                    self.name(),
                    "Prev arrow button not found",
                ));
            }
        }

        Ok(results)
    }
}

/// Clicks a non-initial pagination dot. Presence and clickability only; no
/// content assertion.
pub struct PaginationDots;

#[async_trait]
impl Check for PaginationDots {
    fn name(&self) -> &'static str {
        "Pagination dots"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        let dots = cx
            .probe
            .page()
            .find_elements(
                "[id=\"testimonials\"] button[class*=\"dot\"], \
                 [class*=\"testimonial\"] button[class*=\"dot\"]",
            )
            .await
            .unwrap_or_default();

        if dots.is_empty() {
            return Ok(vec![CheckResult::not_found(
                self.name(),
                "Pagination dots not found",
            )]);
        }

        if dots.len() > 1 {
            crate::click(&dots[1]).await?;
            cx.probe.settle().await;
            let shot = cx.shoot("testimonials-dot-click").await;
            Ok(vec![CheckResult::pass(
                self.name(),
                format!("{} dots present, second dot clickable", dots.len()),
            )
            .with_screenshot(shot)])
        } else {
            Ok(vec![CheckResult::pass(
                self.name(),
                "Single pagination dot present",
            )])
        }
    }
}
