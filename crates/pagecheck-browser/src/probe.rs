use crate::{Error, Result};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use pagecheck_core::{CheckerConfig, Viewport};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Interval between samples when polling a page property for stability
const STABILITY_POLL_MS: u64 = 100;

/// Generic page primitives: navigate, evaluate, resize, scroll, settle,
/// screenshot. All side effects land in the external page; the probe itself
/// holds no check state.
#[derive(Clone)]
pub struct Probe {
    page: Page,
    settle_ms: u64,
    nav_timeout_secs: u64,
    stability_timeout_ms: u64,
}

impl Probe {
    pub fn new(page: Page, config: &CheckerConfig) -> Self {
        Self {
            page,
            settle_ms: config.settle_ms,
            nav_timeout_secs: config.nav_timeout_secs,
            stability_timeout_ms: config.stability_timeout_ms,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate to a URL and wait for the load to finish, bounded by the
    /// configured navigation timeout. Failure here aborts the whole run.
    pub async fn goto(&self, url: &str) -> Result<()> {
        tracing::info!("Navigating to {}", url);

        let nav = async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, Error>(())
        };

        tokio::time::timeout(Duration::from_secs(self.nav_timeout_secs), nav)
            .await
            .map_err(|_| {
                Error::Navigation(format!(
                    "Timed out after {}s loading {}",
                    self.nav_timeout_secs, url
                ))
            })??;

        self.settle().await;
        Ok(())
    }

    /// Evaluate a JS expression against the live DOM and deserialize the
    /// JSON-serializable result
    pub async fn eval<T: DeserializeOwned>(&self, expr: &str) -> Result<T> {
        let result = self.page.evaluate(expr).await?;
        let value = result.value().cloned().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(|e| Error::Eval(e.to_string()))
    }

    /// Switch responsive breakpoint via device-metrics override
    pub async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        tracing::debug!("Setting viewport to {}", viewport);

        let params = SetDeviceMetricsOverrideParams::builder()
            .width(viewport.width as i64)
            .height(viewport.height as i64)
            .device_scale_factor(1.0)
            .mobile(viewport.mobile)
            .build()
            .map_err(Error::Cdp)?;

        self.page.execute(params).await?;
        self.settle().await;
        Ok(())
    }

    /// Fixed settle delay: layout/animation completion is not otherwise
    /// observable after a mutation
    pub async fn settle(&self) {
        self.settle_for(self.settle_ms).await;
    }

    pub async fn settle_for(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// Poll an expression until it settles or the stability timeout elapses;
    /// returns the last sample. Preferred over a fixed delay when a specific
    /// property (e.g. computed visibility) is what the assertion will read.
    ///
    /// Two consecutive equal samples alone are not enough: a transition with
    /// a start delay can hold its pre-click value across several polls. The
    /// value must have moved off the first sample, or one settle interval
    /// must have passed, before agreement counts as settled.
    pub async fn wait_stable(&self, expr: &str) -> Result<serde_json::Value> {
        let start = tokio::time::Instant::now();
        let deadline = start + Duration::from_millis(self.stability_timeout_ms);
        let min_window = Duration::from_millis(self.settle_ms);

        let baseline: serde_json::Value = self.eval(expr).await?;
        let mut previous = baseline.clone();

        loop {
            if tokio::time::Instant::now() >= deadline {
                tracing::debug!("Stability timeout for: {}", expr);
                return Ok(previous);
            }
            tokio::time::sleep(Duration::from_millis(STABILITY_POLL_MS)).await;

            let sample: serde_json::Value = self.eval(expr).await?;
            if settled(&sample, &previous, &baseline, start.elapsed(), min_window) {
                return Ok(sample);
            }
            previous = sample;
        }
    }

    pub async fn scroll_to_top(&self) -> Result<()> {
        self.eval::<serde_json::Value>("window.scrollTo(0, 0)").await?;
        self.settle_for(self.settle_ms / 2).await;
        Ok(())
    }

    /// Scroll the first element matching the selector into view
    pub async fn scroll_into_view(&self, selector: &str) -> Result<bool> {
        let expr = format!(
            "(() => {{ const el = document.querySelector({sel}); \
             if (!el) return false; \
             el.scrollIntoView({{ behavior: 'smooth', block: 'start' }}); \
             return true; }})()",
            sel = js_string(selector)
        );
        let found: bool = self.eval(&expr).await?;
        self.settle().await;
        Ok(found)
    }

    /// Capture the viewport to `dir/NN-label.png`. Screenshot failures are
    /// logged and swallowed; they never abort a run.
    pub async fn screenshot(&self, dir: &Path, ordinal: usize, label: &str) -> Option<PathBuf> {
        self.capture(dir, ordinal, label, false).await
    }

    /// Capture the full scrollable page
    pub async fn screenshot_full(&self, dir: &Path, ordinal: usize, label: &str) -> Option<PathBuf> {
        self.capture(dir, ordinal, label, true).await
    }

    async fn capture(
        &self,
        dir: &Path,
        ordinal: usize,
        label: &str,
        full_page: bool,
    ) -> Option<PathBuf> {
        let path = dir.join(screenshot_file_name(ordinal, label));
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();

        match self.page.save_screenshot(params, &path).await {
            Ok(_) => {
                tracing::debug!("Captured {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Screenshot {} failed: {}", path.display(), e);
                None
            }
        }
    }
}

/// A sample counts as settled once it agrees with the previous one, provided
/// it either differs from the baseline (the transition has visibly run) or
/// the minimum observation window has elapsed (nothing was ever going to
/// change).
fn settled(
    sample: &serde_json::Value,
    previous: &serde_json::Value,
    baseline: &serde_json::Value,
    elapsed: Duration,
    min_window: Duration,
) -> bool {
    sample == previous && (sample != baseline || elapsed >= min_window)
}

/// Deterministic screenshot name: ordinal prefix + readable suffix
pub fn screenshot_file_name(ordinal: usize, label: &str) -> String {
    let slug: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    format!("{:02}-{}.png", ordinal, slug.trim_matches('-'))
}

/// Quote a string as a JS literal (JSON string syntax is valid JS)
pub fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_names_are_ordinal_prefixed() {
        assert_eq!(screenshot_file_name(1, "desktop initial"), "01-desktop-initial.png");
        assert_eq!(screenshot_file_name(12, "Mobile Hero"), "12-mobile-hero.png");
    }

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(js_string("[id=\"about\"]"), "\"[id=\\\"about\\\"]\"");
    }

    #[test]
    fn test_delayed_transition_is_not_settled_early() {
        // A menu with transition-delay: 150ms still reads hidden on the
        // first few polls; agreement with the baseline must not end the wait
        let hidden = serde_json::Value::Bool(false);
        assert!(!settled(
            &hidden,
            &hidden,
            &hidden,
            Duration::from_millis(100),
            Duration::from_millis(800),
        ));
    }

    #[test]
    fn test_changed_value_settles_immediately() {
        let visible = serde_json::Value::Bool(true);
        let hidden = serde_json::Value::Bool(false);
        assert!(settled(
            &visible,
            &visible,
            &hidden,
            Duration::from_millis(200),
            Duration::from_millis(800),
        ));
    }

    #[test]
    fn test_unchanged_value_settles_after_observation_window() {
        let hidden = serde_json::Value::Bool(false);
        assert!(settled(
            &hidden,
            &hidden,
            &hidden,
            Duration::from_millis(800),
            Duration::from_millis(800),
        ));
    }

    #[test]
    fn test_disagreeing_samples_never_settle() {
        let visible = serde_json::Value::Bool(true);
        let hidden = serde_json::Value::Bool(false);
        assert!(!settled(
            &visible,
            &hidden,
            &hidden,
            Duration::from_secs(5),
            Duration::from_millis(800),
        ));
    }
}
