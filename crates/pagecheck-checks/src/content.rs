use crate::{Check, CheckContext, Result};
use async_trait::async_trait;
use pagecheck_browser::js_string;
use pagecheck_core::CheckResult;

/// One expected phrase: satisfied when any alternative is contained in the
/// section's text; otherwise reported under its issue name.
pub struct Phrase {
    pub issue: &'static str,
    pub any_of: &'static [&'static str],
}

/// Expected phrases for one page section
pub struct SectionSpec {
    pub name: &'static str,
    pub selector: &'static str,
    pub phrases: &'static [Phrase],
}

/// The content expectations of the portfolio under test, section by section
pub fn portfolio_expectations() -> Vec<SectionSpec> {
    vec![
        SectionSpec {
            name: "Hero",
            selector: "#hero, header, section:first-of-type",
            phrases: &[
                Phrase {
                    issue: "Hero: Missing \"Brand Strategy & Marketing\"",
                    any_of: &["Brand Strategy", "BRAND STRATEGY"],
                },
                Phrase {
                    issue: "Hero: Missing \"Marketing\"",
                    any_of: &["Marketing", "MARKETING"],
                },
                Phrase {
                    issue: "Hero: Missing \"competitive markets\" tagline",
                    any_of: &["competitive markets", "Building brands that win"],
                },
            ],
        },
        SectionSpec {
            name: "About",
            selector: "[id=\"about\"]",
            phrases: &[
                Phrase {
                    issue: "About: Heading not updated",
                    any_of: &["Strategy-first thinking"],
                },
                Phrase {
                    issue: "About: Missing \"2+ Years\" stat",
                    any_of: &["2+ Years", "2+"],
                },
                Phrase {
                    issue: "About: Missing \"10+ Premium Brands\" stat",
                    any_of: &["10+ Premium Brands", "10+"],
                },
                Phrase {
                    issue: "About: Missing \"4+ National Campaigns\" stat",
                    any_of: &["4+ National Campaigns", "4+"],
                },
            ],
        },
        SectionSpec {
            name: "Skills",
            selector: "[id=\"skills\"]",
            phrases: &[
                Phrase {
                    issue: "Skills: Missing \"Strategic & Brand\" category",
                    any_of: &["Strategic & Brand", "Strategic"],
                },
                Phrase {
                    issue: "Skills: Missing \"Digital & Content\" category",
                    any_of: &["Digital & Content", "Digital"],
                },
                Phrase {
                    issue: "Skills: Missing \"Client & Leadership\" category",
                    any_of: &["Client & Leadership", "Client"],
                },
                Phrase {
                    issue: "Skills: Missing \"Tools & Platforms\" category",
                    any_of: &["Tools & Platforms", "Tools"],
                },
            ],
        },
        SectionSpec {
            name: "Experience",
            selector: "[id=\"experience\"]",
            phrases: &[Phrase {
                issue: "Experience: Bullet points not impact-focused",
                any_of: &["Delivered", "Led", "Drove", "Increased", "Achieved"],
            }],
        },
        SectionSpec {
            name: "Case Studies",
            selector: "[id=\"portfolio\"], [id=\"projects\"], [id=\"case-studies\"]",
            phrases: &[Phrase {
                issue: "Case Studies: Section not renamed from \"Portfolio\"",
                any_of: &["Case Studies", "case studies"],
            }],
        },
        SectionSpec {
            name: "Testimonials",
            selector: "[id=\"testimonials\"]",
            phrases: &[Phrase {
                issue: "Testimonials: Missing strategic language",
                any_of: &["strategic", "strategy", "brand"],
            }],
        },
    ]
}

/// Structured-paragraph labels expected inside a case-study modal
pub fn modal_labels() -> Vec<Phrase> {
    vec![
        Phrase {
            issue: "Modal: Missing \"Brand Background:\" label",
            any_of: &["Brand Background:", "Brand Background"],
        },
        Phrase {
            issue: "Modal: Missing \"Challenge:\" label",
            any_of: &["Challenge:", "Challenge"],
        },
        Phrase {
            issue: "Modal: Missing \"Strategy:\" label",
            any_of: &["Strategy:", "Strategy"],
        },
        Phrase {
            issue: "Modal: Missing \"Execution:\" label",
            any_of: &["Execution:", "Execution"],
        },
        Phrase {
            issue: "Modal: Missing \"Impact:\" label",
            any_of: &["Impact:", "Impact"],
        },
        Phrase {
            issue: "Modal: Missing \"Learning:\" label",
            any_of: &["Learning:", "Learning"],
        },
    ]
}

/// Issue names for every phrase none of whose alternatives appear in `text`
pub fn missing_phrases(text: &str, phrases: &[Phrase]) -> Vec<&'static str> {
    phrases
        .iter()
        .filter(|p| !p.any_of.iter().any(|needle| text.contains(needle)))
        .map(|p| p.issue)
        .collect()
}

/// Outcome of the navigation-label check: the nav must say "Case Studies"
/// rather than the older "Portfolio"
pub fn navigation_result(nav_text: Option<&str>) -> CheckResult {
    const NAME: &str = "Content phrases";
    match nav_text {
        None => CheckResult::not_found(NAME, "Navigation: Not found"),
        Some(text) if text.contains("Case Studies") => {
            CheckResult::pass(NAME, "Navigation shows \"Case Studies\"")
        }
        Some(text) if text.contains("Portfolio") => {
            CheckResult::warn(NAME, "Navigation: Not updated to \"Case Studies\"")
        }
        Some(_) => CheckResult::warn(NAME, "Navigation: Could not determine link text"),
    }
}

async fn section_text(cx: &CheckContext<'_>, selector: &str) -> Result<Option<String>> {
    let expr = format!(
        "(() => {{ const el = document.querySelector({sel}); \
         return el ? el.textContent : null; }})()",
        sel = js_string(selector)
    );
    Ok(cx.probe.eval(&expr).await?)
}

/// String-containment verification of the expected phrase set, section by
/// section, each missing phrase recorded as its own issue.
pub struct ContentPhrases;

#[async_trait]
impl Check for ContentPhrases {
    fn name(&self) -> &'static str {
        "Content phrases"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        cx.probe.set_viewport(cx.config.desktop).await?;
        let mut results = Vec::new();

        for spec in portfolio_expectations() {
            cx.probe.scroll_into_view(spec.selector).await?;
            let shot = cx
                .shoot(&format!("verify-{}", spec.name.to_lowercase()))
                .await;

            let Some(text) = section_text(cx, spec.selector).await? else {
                results.push(
                    CheckResult::not_found(
                        self.name(),
                        format!("{}: Section not found", spec.name),
                    )
                    .with_screenshot(shot),
                );
                continue;
            };

            let missing = missing_phrases(&text, spec.phrases);
            if missing.is_empty() {
                results.push(
                    CheckResult::pass(
                        self.name(),
                        format!("{}: expected phrases present", spec.name),
                    )
                    .with_screenshot(shot),
                );
            } else {
                for issue in missing {
                    results.push(CheckResult::warn(self.name(), issue).with_screenshot(shot.clone()));
                }
            }
        }

        // Navigation label lives outside the section list
        cx.probe.scroll_to_top().await?;
        let shot = cx.shoot("verify-navigation").await;
        let nav_text = section_text(cx, "nav").await?;
        results.push(navigation_result(nav_text.as_deref()).with_screenshot(shot));

        Ok(results)
    }
}

/// Opens the first case-study modal and asserts its six structured labels
pub struct ModalContent;

#[async_trait]
impl Check for ModalContent {
    fn name(&self) -> &'static str {
        "Case-study modal content"
    }

    async fn run(&self, cx: &mut CheckContext<'_>) -> Result<Vec<CheckResult>> {
        let section = "[id=\"portfolio\"], [id=\"projects\"], [id=\"case-studies\"]";
        cx.probe.scroll_into_view(section).await?;

        let clicked: bool = cx
            .probe
            .eval(
                "(() => { \
                 const section = document.querySelector('[id=\"portfolio\"], [id=\"projects\"], [id=\"case-studies\"]'); \
                 if (!section) return false; \
                 const buttons = Array.from(section.querySelectorAll('button')); \
                 const target = buttons.find(btn => \
                   btn.textContent.includes('Hindware') || btn.textContent.includes('Sukoon')) \
                   || buttons[0]; \
                 if (!target) return false; \
                 target.click(); \
                 return true; })()",
            )
            .await?;

        if !clicked {
            return Ok(vec![CheckResult::not_found(
                self.name(),
                "Case-study button not found",
            )]);
        }

        cx.probe.settle().await;
        let shot = cx.shoot("case-study-modal-open").await;

        let modal_text: Option<String> = cx
            .probe
            .eval(
                "(() => { \
                 const modal = document.querySelector('[class*=\"fixed\"][class*=\"inset-0\"], [role=\"dialog\"]'); \
                 return modal && modal.textContent.length > 100 ? modal.textContent : null; })()",
            )
            .await?;

        let mut results = Vec::new();
        match modal_text {
            None => {
                results.push(
                    CheckResult::fail(self.name(), "Modal: Did not open or missing content")
                        .with_screenshot(shot),
                );
            }
            Some(text) => {
                let missing = missing_phrases(&text, &modal_labels());
                if missing.is_empty() {
                    results.push(
                        CheckResult::pass(self.name(), "All structured labels present")
                            .with_screenshot(shot),
                    );
                } else {
                    for issue in missing {
                        results.push(CheckResult::warn(self.name(), issue));
                    }
                }

                // Leave the page as we found it
                cx.probe
                    .eval::<serde_json::Value>(
                        "(() => { const btn = document.querySelector('button[aria-label=\"Close\"]'); \
                         if (btn) btn.click(); return null; })()",
                    )
                    .await?;
                cx.probe.settle_for(cx.config.settle_ms / 2).await;
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecheck_core::Status;

    #[test]
    fn test_phrase_contained_in_longer_heading_passes() {
        let heading = "Strategy-first thinking, brand-led execution.";
        let phrases = [Phrase {
            issue: "About: Heading not updated",
            any_of: &["Strategy-first thinking"],
        }];
        assert!(missing_phrases(heading, &phrases).is_empty());
    }

    #[test]
    fn test_missing_phrase_reports_issue_name() {
        let phrases = [Phrase {
            issue: "Skills: Missing \"Tools & Platforms\" category",
            any_of: &["Tools & Platforms", "Tools"],
        }];
        let missing = missing_phrases("Strategic, Digital, Client", &phrases);
        assert_eq!(
            missing,
            vec!["Skills: Missing \"Tools & Platforms\" category"]
        );
    }

    #[test]
    fn test_any_alternative_satisfies_phrase() {
        let phrases = [Phrase {
            issue: "Hero: Missing \"competitive markets\" tagline",
            any_of: &["competitive markets", "Building brands that win"],
        }];
        assert!(missing_phrases("Building brands that win.", &phrases).is_empty());
    }

    #[test]
    fn test_navigation_still_reading_portfolio_is_flagged() {
        let result = navigation_result(Some("Home About Portfolio Contact"));
        assert_eq!(result.status, Status::Warn);
        assert_eq!(result.message, "Navigation: Not updated to \"Case Studies\"");
    }

    #[test]
    fn test_navigation_case_studies_passes() {
        let result = navigation_result(Some("Home About Case Studies Contact"));
        assert_eq!(result.status, Status::Pass);
    }

    #[test]
    fn test_navigation_absent_is_not_found() {
        assert_eq!(navigation_result(None).status, Status::NotFound);
    }

    #[test]
    fn test_modal_labels_cover_all_six_paragraphs() {
        let labels = modal_labels();
        assert_eq!(labels.len(), 6);
        let missing = missing_phrases(
            "Brand Background: ... Challenge: ... Strategy: ... \
             Execution: ... Impact: ... Learning: ...",
            &labels,
        );
        assert!(missing.is_empty());
    }
}
