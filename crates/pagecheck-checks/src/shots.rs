use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_core::{CheckResult, PageSection};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PageInfo {
    title: String,
    #[serde(rename = "documentHeight")]
    document_height: i64,
    #[serde(rename = "brokenImages")]
    broken_images: Vec<String>,
}

/// Captures the full page and each named section at the desktop breakpoint,
/// plus a broken-image scan.
pub struct ScreenshotSweep;

#[async_trait]
impl Check for ScreenshotSweep {
    fn name(&self) -> &'static str {
        "Screenshot sweep"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.set_viewport(cx.config.desktop).await?;
        cx.probe.scroll_to_top().await?;
        cx.shoot_full("full-page").await;

        let mut captured = 0usize;
        let mut missing: Vec<&str> = Vec::new();

        for section in PageSection::standard() {
            let selector = section.selectors.join(", ");
            if cx.probe.scroll_into_view(&selector).await? {
                cx.shoot(&section.name.to_lowercase()).await;
                captured += 1;
            } else {
                missing.push(section.name);
            }
        }

        let info: PageInfo = cx
            .probe
            .eval(
                "(() => { \
                 const broken = []; \
                 document.querySelectorAll('img').forEach(img => { \
                   if (!img.complete || img.naturalHeight === 0) { \
                     broken.push(img.src || img.alt || 'unnamed'); \
                   } \
                 }); \
                 return { title: document.title, \
                   documentHeight: document.documentElement.scrollHeight, \
                   brokenImages: broken }; })()",
            )
            .await?;

        let mut results = vec![CheckResult::pass(
            self.name(),
            format!(
                "Captured {} section(s) of \"{}\" ({}px tall)",
                captured, info.title, info.document_height
            ),
        )];

        if !missing.is_empty() {
            results.push(
                CheckResult::not_found(
                    self.name(),
                    format!("{} section(s) not found", missing.len()),
                )
                .with_details(serde_json::json!(missing)),
            );
        }

        if !info.broken_images.is_empty() {
            results.push(
                CheckResult::warn(
                    self.name(),
                    format!("{} broken image(s)", info.broken_images.len()),
                )
                .with_details(serde_json::json!(info.broken_images)),
            );
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_parses_payload() {
        let info: PageInfo = serde_json::from_value(serde_json::json!({
            "title": "Portfolio",
            "documentHeight": 9200,
            "brokenImages": ["https://cdn.example.com/head.jpg"]
        }))
        .unwrap();
        assert_eq!(info.title, "Portfolio");
        assert_eq!(info.broken_images.len(), 1);
    }
}
