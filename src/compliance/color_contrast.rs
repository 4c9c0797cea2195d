//! Color contrast check backed by an external scorer.
//!
//! The contrast algorithm itself lives in the host (it needs the rendered
//! background). This module builds one sample per distinct text style in each
//! text element and reports elements with any sample graded below AA.

use super::types::InvalidElement;
use crate::config::{CheckerConfig, PageDimensions};
use crate::elements::{ElementId, ElementType, PageId, PageToElementsMap, Rect, RichNode};
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;

/// Grades starting with this prefix pass (`"AA"`, `"AAA"`, `"AA Large"`).
pub const PASSING_GRADE_PREFIX: &str = "AA";

/// One text style of one element, as handed to the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastSample {
    /// Element being scored
    pub element_id: ElementId,
    /// Page holding the element
    pub page_id: PageId,
    /// Text color as a hex string
    pub target_color: String,
    /// Element position in page pixels
    pub target_rect: Rect,
    /// Page size in pixels
    pub page_dimensions: PageDimensions,
    /// Font size in pixels
    pub target_font_size: u32,
    /// CSS font weight
    pub target_font_weight: String,
}

/// External contrast scorer.
pub trait ContrastScorer {
    /// Grade one sample, e.g. `"AAA"`, `"AA"`, `"Fail"`.
    fn grade(&self, sample: &ContrastSample) -> Result<String>;
}

impl<F> ContrastScorer for F
where
    F: Fn(&ContrastSample) -> Result<String>,
{
    fn grade(&self, sample: &ContrastSample) -> Result<String> {
        self(sample)
    }
}

/// Check whether a grade passes.
pub fn is_passing_grade(grade: &str) -> bool {
    grade.starts_with(PASSING_GRADE_PREFIX)
}

/// Distinct `(color, size, weight)` styles used by non-empty text runs.
fn text_styles(content: &RichNode, config: &CheckerConfig) -> Vec<(String, u32, String)> {
    let mut styles: Vec<(String, u32, String)> = Vec::new();
    for leaf in content.text_leaves() {
        let mut color = config.default_text_color.clone();
        let mut size = config.min_font_size;
        let mut weight = config.default_font_weight.clone();
        for mark in leaf.marks.iter().filter(|m| m.is_text_style()) {
            if let Some(c) = mark.color() {
                color = c.to_string();
            }
            if let Some(s) = mark.parsed_font_size() {
                size = s;
            }
            if let Some(w) = mark.font_weight() {
                weight = w;
            }
        }
        let style = (color, size, weight);
        if !styles.contains(&style) {
            styles.push(style);
        }
    }
    styles
}

/// Report text elements whose text fails the contrast scorer.
///
/// `page_dimensions` overrides the configured default per page. Scorer errors
/// skip the element.
pub fn check_color_contrast(
    page_map: &PageToElementsMap,
    page_dimensions: &HashMap<PageId, PageDimensions>,
    scorer: &dyn ContrastScorer,
    config: &CheckerConfig,
) -> Vec<InvalidElement> {
    let mut invalid = Vec::new();
    for (page_id, elements) in page_map {
        let dimensions = page_dimensions
            .get(page_id)
            .copied()
            .unwrap_or(config.default_page_dimensions);
        for element in elements {
            if element.data.element_type() != ElementType::Text {
                continue;
            }
            let Some(content) = element.data.rich_content() else {
                continue;
            };
            let mut failed = false;
            for (color, size, weight) in text_styles(content, config) {
                let sample = ContrastSample {
                    element_id: element.element_id.clone(),
                    page_id: page_id.clone(),
                    target_color: color,
                    target_rect: element.data.rect(),
                    page_dimensions: dimensions,
                    target_font_size: size,
                    target_font_weight: weight,
                };
                match scorer.grade(&sample) {
                    Ok(grade) if is_passing_grade(&grade) => {},
                    Ok(grade) => {
                        log::debug!("Element {} graded {}", element.element_id, grade);
                        failed = true;
                        break;
                    },
                    Err(e) => {
                        log::warn!("Skipping contrast check for {}: {}", element.element_id, e);
                        break;
                    },
                }
            }
            if failed {
                invalid.push(InvalidElement::new(page_id.clone(), element.element_id.clone()));
            }
        }
    }
    invalid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementData, Mark, PageElement, TextElement, VisualElement};
    use crate::error::Error;

    fn colored_text(colors: &[&str]) -> ElementData {
        let runs = colors
            .iter()
            .map(|c| {
                RichNode::marked_text("x", vec![Mark::font_size("18px").with_attr("color", *c)])
            })
            .collect();
        ElementData::Text(TextElement::new(RichNode::doc(vec![RichNode::paragraph(runs)])))
    }

    fn light_gray_fails(sample: &ContrastSample) -> Result<String> {
        Ok(if sample.target_color == "#eeeeee" { "Fail" } else { "AAA" }.to_string())
    }

    #[test]
    fn test_grade_prefix() {
        assert!(is_passing_grade("AA"));
        assert!(is_passing_grade("AAA"));
        assert!(is_passing_grade("AA Large"));
        assert!(!is_passing_grade("A"));
        assert!(!is_passing_grade("Fail"));
    }

    #[test]
    fn test_any_failing_style_flags_element() {
        let mut map = PageToElementsMap::new();
        map.insert(
            "p1".to_string(),
            vec![
                PageElement::new("dark", colored_text(&["#000000"])),
                PageElement::new("mixed", colored_text(&["#000000", "#eeeeee"])),
                PageElement::new("img", ElementData::Image(VisualElement::default())),
            ],
        );
        let invalid =
            check_color_contrast(&map, &HashMap::new(), &light_gray_fails, &CheckerConfig::default());
        assert_eq!(invalid, vec![InvalidElement::new("p1", "mixed")]);
    }

    #[test]
    fn test_sample_uses_defaults_and_page_dimensions() {
        let mut map = PageToElementsMap::new();
        map.insert(
            "p1".to_string(),
            vec![PageElement::new("plain", ElementData::Text(TextElement::heading("p", "hi")))],
        );
        let mut dims = HashMap::new();
        dims.insert("p1".to_string(), PageDimensions { width: 800.0, height: 600.0 });

        let seen = std::cell::RefCell::new(Vec::new());
        let recorder = |sample: &ContrastSample| -> Result<String> {
            seen.borrow_mut().push(sample.clone());
            Ok("AA".to_string())
        };
        assert!(check_color_contrast(&map, &dims, &recorder, &CheckerConfig::default()).is_empty());

        let samples = seen.borrow();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].target_color, "#000000");
        assert_eq!(samples[0].target_font_size, 16);
        assert_eq!(samples[0].target_font_weight, "normal");
        assert_eq!(samples[0].page_dimensions.width, 800.0);
    }

    #[test]
    fn test_scorer_error_skips_element() {
        let mut map = PageToElementsMap::new();
        map.insert("p1".to_string(), vec![PageElement::new("t", colored_text(&["#eeeeee"]))]);
        let failing = |sample: &ContrastSample| -> Result<String> {
            Err(Error::Scorer {
                element_id: sample.element_id.to_string(),
                reason: "offscreen".to_string(),
            })
        };
        assert!(check_color_contrast(&map, &HashMap::new(), &failing, &CheckerConfig::default())
            .is_empty());
    }
}
