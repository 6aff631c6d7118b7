use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_browser::{Found, Locator};
use pagecheck_core::CheckResult;
use serde::Deserialize;

const CONTACT_SECTION: &str = "[id=\"contact\"]";

fn submit_locator() -> Locator {
    Locator::css(&["form button[type=\"submit\"]"]).or_text("button", "Send")
}

#[derive(Debug, Deserialize)]
struct ValidationMessage {
    #[serde(default)]
    field: Option<String>,
    message: String,
}

async fn collect_validation_messages(
    cx: &CheckContext<'_>,
) -> Result<Vec<ValidationMessage>> {
    let messages: Vec<ValidationMessage> = cx
        .probe
        .eval(
            "(() => { const messages = []; \
             document.querySelectorAll('form input, form textarea').forEach(input => { \
               if (input.validationMessage) { \
                 messages.push({ field: input.name || input.id || null, message: input.validationMessage }); \
               } \
             }); \
             document.querySelectorAll('[class*=\"error\"], [class*=\"invalid\"]').forEach(el => { \
               if (el.textContent.trim()) { \
                 messages.push({ field: null, message: el.textContent.trim() }); \
               } \
             }); \
             return messages; })()",
        )
        .await?;
    Ok(messages)
}

/// Submits the contact form with empty required fields and looks for native
/// or custom validation messages. Absence is a warning, not a failure — the
/// page may be intentionally unvalidated.
pub struct FormValidation;

#[async_trait]
impl Check for FormValidation {
    fn name(&self) -> &'static str {
        "Form validation (empty submit)"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.scroll_into_view(CONTACT_SECTION).await?;
        cx.shoot("contact-form-initial").await;

        let Some(submit) = submit_locator().resolve(cx.probe.page()).await else {
            return Ok(vec![CheckResult::not_found(
                self.name(),
                "Submit button not found",
            )]);
        };

        crate::click(&submit.element).await?;
        cx.probe.settle().await;
        let shot = cx.shoot("contact-form-empty-submit").await;

        let messages = collect_validation_messages(cx).await?;

        if messages.is_empty() {
            Ok(vec![CheckResult::warn(
                self.name(),
                "No validation messages for empty required fields",
            )
            .with_screenshot(shot)])
        } else {
            let details: Vec<String> = messages
                .iter()
                .map(|m| {
                    format!(
                        "{}: {}",
                        m.field.as_deref().unwrap_or("field"),
                        m.message
                    )
                })
                .collect();
            Ok(vec![CheckResult::pass(
                self.name(),
                format!("{} validation message(s) shown", messages.len()),
            )
            .with_details(serde_json::json!(details))
            .with_screenshot(shot)])
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionSignal {
    #[serde(rename = "hasSuccess")]
    has_success: bool,
    #[serde(rename = "formReset")]
    form_reset: bool,
}

async fn find_field(cx: &CheckContext<'_>, candidates: &[&str]) -> Option<Found> {
    Locator::css(candidates).resolve(cx.probe.page()).await
}

/// Fills the name/email/message fields and submits, then looks for either a
/// success/thank-you element or a reset (cleared) name field.
pub struct FormSubmission;

#[async_trait]
impl Check for FormSubmission {
    fn name(&self) -> &'static str {
        "Form submission (filled)"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.scroll_into_view(CONTACT_SECTION).await?;

        let name = find_field(
            cx,
            &[
                "input[name=\"name\"]",
                "input[id=\"name\"]",
                "input[placeholder*=\"name\" i]",
            ],
        )
        .await;
        let email = find_field(
            cx,
            &[
                "input[name=\"email\"]",
                "input[id=\"email\"]",
                "input[type=\"email\"]",
            ],
        )
        .await;
        let message = find_field(
            cx,
            &["textarea[name=\"message\"]", "textarea[id=\"message\"]"],
        )
        .await;

        let (Some(name), Some(email), Some(message)) = (name, email, message) else {
            return Ok(vec![CheckResult::warn(
                self.name(),
                "Could not locate all form fields",
            )]);
        };

        let Some(submit) = submit_locator().resolve(cx.probe.page()).await else {
            return Ok(vec![CheckResult::not_found(
                self.name(),
                "Submit button not found",
            )]);
        };

        type_into(&name, "Test User").await?;
        type_into(&email, "test@example.com").await?;
        type_into(&message, "This is a test message for QA purposes.").await?;

        cx.probe.settle_for(cx.config.settle_ms / 2).await;
        cx.shoot("contact-form-filled").await;

        crate::click(&submit.element).await?;
        // Submission may kick off a network round trip; give it longer
        cx.probe.settle_for(cx.config.settle_ms * 2).await;
        let shot = cx.shoot("contact-form-submitted").await;

        let signal: SubmissionSignal = cx
            .probe
            .eval(
                "(() => { \
                 const successEls = document.querySelectorAll('[class*=\"success\"], [class*=\"thank\"]'); \
                 const hasSuccess = Array.from(successEls).some(el => \
                   el.textContent.toLowerCase().includes('success') || \
                   el.textContent.toLowerCase().includes('thank')); \
                 const nameInput = document.querySelector('input[name=\"name\"], input[id=\"name\"]'); \
                 const formReset = !!nameInput && nameInput.value === ''; \
                 return { hasSuccess, formReset }; })()",
            )
            .await?;

        let result = if signal.has_success {
            CheckResult::pass(self.name(), "Success message displayed after submission")
        } else if signal.form_reset {
            CheckResult::pass(self.name(), "Form reset after submission")
        } else {
            CheckResult::warn(
                self.name(),
                "Submission result unclear (no success message or reset detected)",
            )
        };

        Ok(vec![result.with_screenshot(shot)])
    }
}

async fn type_into(field: &Found, text: &str) -> Result<()> {
    crate::click(&field.element).await?;
    field
        .element
        .type_str(text)
        .await
        .map_err(|e| pagecheck_browser::Error::Cdp(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_locator_falls_back_to_send_text() {
        let described: Vec<String> = submit_locator()
            .matchers()
            .iter()
            .map(|m| m.describe())
            .collect();
        assert_eq!(described[0], "form button[type=\"submit\"]");
        assert!(described[1].contains("Send"));
    }

    #[test]
    fn test_validation_message_parses_page_payload() {
        let raw = serde_json::json!([
            { "field": "email", "message": "Please fill out this field." },
            { "field": null, "message": "Name is required" }
        ]);
        let messages: Vec<ValidationMessage> = serde_json::from_value(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].field.as_deref(), Some("email"));
        assert!(messages[1].field.is_none());
    }
}
