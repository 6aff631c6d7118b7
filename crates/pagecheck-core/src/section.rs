/// A named page section and the selector candidates used to locate it.
///
/// Candidates are tried in declared order; the markup of the page under test
/// is not contractually stable, so each section carries several heuristics.
#[derive(Debug, Clone)]
pub struct PageSection {
    pub name: &'static str,
    pub selectors: &'static [&'static str],
}

impl PageSection {
    /// The fixed section list of the single-page portfolio layout,
    /// top to bottom.
    pub fn standard() -> Vec<PageSection> {
        vec![
            PageSection {
                name: "Hero",
                selectors: &["header", "[class*=\"hero\"]", "section:first-of-type"],
            },
            PageSection {
                name: "About",
                selectors: &["[id=\"about\"]"],
            },
            PageSection {
                name: "Skills",
                selectors: &["[id=\"skills\"]"],
            },
            PageSection {
                name: "Experience",
                selectors: &["[id=\"experience\"]"],
            },
            PageSection {
                name: "Portfolio",
                selectors: &["[id=\"projects\"]", "[id=\"portfolio\"]", "[id=\"case-studies\"]"],
            },
            PageSection {
                name: "Testimonials",
                selectors: &["[id=\"testimonials\"]"],
            },
            PageSection {
                name: "Education",
                selectors: &["[id=\"education\"]"],
            },
            PageSection {
                name: "Contact",
                selectors: &["[id=\"contact\"]"],
            },
            PageSection {
                name: "Footer",
                selectors: &["footer"],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sections_cover_full_page() {
        let sections = PageSection::standard();
        let names: Vec<&str> = sections.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Hero",
                "About",
                "Skills",
                "Experience",
                "Portfolio",
                "Testimonials",
                "Education",
                "Contact",
                "Footer"
            ]
        );
    }

    #[test]
    fn test_every_section_has_candidates() {
        for section in PageSection::standard() {
            assert!(
                !section.selectors.is_empty(),
                "{} has no selector candidates",
                section.name
            );
        }
    }
}
