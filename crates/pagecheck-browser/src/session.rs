use crate::{chrome_finder, Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams as NetworkEnableParams, EventLoadingFailed, EventRequestWillBeSent,
};
use chromiumoxide::cdp::js_protocol::runtime::{
    ConsoleApiCalledType, EnableParams as RuntimeEnableParams, EventConsoleApiCalled,
    EventExceptionThrown, RemoteObject,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use pagecheck_core::{CheckerConfig, ConsoleLevel, ConsoleMessage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Owns the browser process, the single page under test, and the diagnostic
/// watcher that records console output, uncaught page errors, and failed
/// network requests.
///
/// Launch failure is fatal to the whole run; once launched, `close` must be
/// called on every exit path so the underlying process is terminated.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    watcher_task: JoinHandle<()>,
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl BrowserSession {
    /// Launch a browser and open one blank page
    pub async fn launch(config: &CheckerConfig) -> Result<Self> {
        let chrome_path = chrome_finder::find_chrome(config.chrome_path.as_deref())?;
        tracing::info!("Launching Chrome from {}", chrome_path.display());

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&chrome_path)
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .window_size(config.desktop.width, config.desktop.height);

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))?;

        // The handler must run for every other CDP command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    // Some CDP events are not fully parseable; keep going
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.execute(RuntimeEnableParams::default()).await?;
        page.execute(NetworkEnableParams::default()).await?;

        let messages = Arc::new(Mutex::new(Vec::new()));
        let watcher_task = Self::spawn_watcher(&page, Arc::clone(&messages)).await?;

        tracing::info!("Browser session ready");

        Ok(Self {
            browser,
            page,
            handler_task,
            watcher_task,
            messages,
        })
    }

    /// The single page this session drives
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Snapshot of every diagnostic-channel message captured so far
    pub fn console_messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Close the page and terminate the browser process. Called on all exit
    /// paths, including after fatal navigation errors.
    pub async fn close(mut self) -> Result<()> {
        self.watcher_task.abort();

        if let Err(e) = self.browser.close().await {
            tracing::warn!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Browser wait failed: {}", e);
        }

        self.handler_task.abort();
        tracing::info!("Browser session closed");
        Ok(())
    }

    /// Subscribe to console, exception, and network-failure events and
    /// accumulate them as diagnostic messages
    async fn spawn_watcher(
        page: &Page,
        messages: Arc<Mutex<Vec<ConsoleMessage>>>,
    ) -> Result<JoinHandle<()>> {
        let mut console_events = page.event_listener::<EventConsoleApiCalled>().await?;
        let mut exception_events = page.event_listener::<EventExceptionThrown>().await?;
        let mut request_events = page.event_listener::<EventRequestWillBeSent>().await?;
        let mut failed_events = page.event_listener::<EventLoadingFailed>().await?;

        let task = tokio::spawn(async move {
            // request id -> url, so failed-request messages carry the URL
            let mut request_urls: HashMap<String, String> = HashMap::new();

            loop {
                tokio::select! {
                    Some(event) = console_events.next() => {
                        let level = match event.r#type {
                            ConsoleApiCalledType::Error => ConsoleLevel::Error,
                            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
                            ConsoleApiCalledType::Info => ConsoleLevel::Info,
                            _ => ConsoleLevel::Log,
                        };
                        let text = render_console_args(&event.args);
                        tracing::debug!("Console [{:?}]: {}", level, text);
                        push_message(&messages, level, text);
                    }
                    Some(event) = exception_events.next() => {
                        let detail = event
                            .exception_details
                            .exception
                            .as_ref()
                            .and_then(|e| e.description.clone())
                            .unwrap_or_else(|| event.exception_details.text.clone());
                        tracing::debug!("Page error: {}", detail);
                        push_message(
                            &messages,
                            ConsoleLevel::Error,
                            format!("Page error: {}", detail),
                        );
                    }
                    Some(event) = request_events.next() => {
                        request_urls.insert(
                            event.request_id.inner().to_string(),
                            event.request.url.clone(),
                        );
                    }
                    Some(event) = failed_events.next() => {
                        let url = request_urls
                            .get(event.request_id.inner())
                            .cloned()
                            .unwrap_or_else(|| "<unknown>".to_string());
                        tracing::debug!("Failed request: {} - {}", url, event.error_text);
                        push_message(
                            &messages,
                            ConsoleLevel::Error,
                            format!("Failed request: {} - {}", url, event.error_text),
                        );
                    }
                    else => break,
                }
            }
        });

        Ok(task)
    }
}

fn push_message(messages: &Arc<Mutex<Vec<ConsoleMessage>>>, level: ConsoleLevel, text: String) {
    if let Ok(mut buffer) = messages.lock() {
        buffer.push(ConsoleMessage { level, text });
    }
}

/// Join console call arguments into one readable line
fn render_console_args(args: &[RemoteObject]) -> String {
    args.iter()
        .map(|arg| {
            arg.value
                .as_ref()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .or_else(|| arg.description.clone())
                .unwrap_or_else(|| "<object>".to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_string(s: &str) -> RemoteObject {
        RemoteObject::builder()
            .r#type(chromiumoxide::cdp::js_protocol::runtime::RemoteObjectType::String)
            .value(serde_json::Value::String(s.to_string()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_render_console_args_joins_values() {
        let args = vec![remote_string("failed to load"), remote_string("widget.js")];
        assert_eq!(render_console_args(&args), "failed to load widget.js");
    }

    #[test]
    fn test_render_console_args_handles_non_strings() {
        let arg = RemoteObject::builder()
            .r#type(chromiumoxide::cdp::js_protocol::runtime::RemoteObjectType::Number)
            .value(serde_json::json!(404))
            .build()
            .unwrap();
        assert_eq!(render_console_args(&[arg]), "404");
    }

    // Launch/teardown behavior requires a Chrome binary and is covered by
    // running the CLI against a live page
}
