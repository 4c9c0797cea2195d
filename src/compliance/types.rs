//! Checker names and result types.

use crate::elements::{ElementId, PageId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a checker produces its findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    /// Detects invalid elements automatically
    Automatic,
    /// Produces a document-level verdict, no element list
    DocumentLevel,
    /// Surfaced to a human reviewer only
    ManualOnly,
}

/// Every checker tracked by the result store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckerName {
    /// Visual elements need alt text or a decorative flag
    AltText,
    /// Text must contrast with its background
    ColorContrast,
    /// Document text must have a detectable language
    DocumentLanguage,
    /// Headings must not skip levels
    HeadingOrder,
    /// Links need manual review of their text
    Links,
    /// Reading order needs manual review
    ReadingOrder,
    /// Sequence of meaning needs manual review
    MeaningfulSequence,
    /// Tables need manual review of their headers
    TableHeading,
    /// Text must not be smaller than the minimum size
    TextSize,
}

impl CheckerName {
    /// All checkers, in store order.
    pub const ALL: [CheckerName; 9] = [
        CheckerName::AltText,
        CheckerName::ColorContrast,
        CheckerName::DocumentLanguage,
        CheckerName::HeadingOrder,
        CheckerName::Links,
        CheckerName::ReadingOrder,
        CheckerName::MeaningfulSequence,
        CheckerName::TableHeading,
        CheckerName::TextSize,
    ];

    /// Wire name, e.g. `"headingOrder"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerName::AltText => "altText",
            CheckerName::ColorContrast => "colorContrast",
            CheckerName::DocumentLanguage => "documentLanguage",
            CheckerName::HeadingOrder => "headingOrder",
            CheckerName::Links => "links",
            CheckerName::ReadingOrder => "readingOrder",
            CheckerName::MeaningfulSequence => "meaningfulSequence",
            CheckerName::TableHeading => "tableHeading",
            CheckerName::TextSize => "textSize",
        }
    }

    /// Parse a wire name; `None` for unknown checkers.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|checker| checker.as_str() == name)
    }

    /// Detection category.
    pub fn kind(&self) -> CheckerKind {
        match self {
            CheckerName::DocumentLanguage => CheckerKind::DocumentLevel,
            CheckerName::ReadingOrder | CheckerName::MeaningfulSequence => CheckerKind::ManualOnly,
            _ => CheckerKind::Automatic,
        }
    }

    /// Check whether this checker reports invalid elements.
    pub fn supports_invalid_elements(&self) -> bool {
        self.kind() == CheckerKind::Automatic
    }

    /// Initial result for this checker.
    pub fn default_result(&self) -> CheckerResult {
        CheckerResult {
            resolved_manually: false,
            requires_manual_review: false,
            invalid_elements: self.supports_invalid_elements().then(Vec::new),
        }
    }
}

impl fmt::Display for CheckerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An element failing a checker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidElement {
    /// Page holding the element
    pub page_id: PageId,
    /// The failing element
    pub element_id: ElementId,
}

impl InvalidElement {
    /// Create an invalid-element record.
    pub fn new(page_id: impl Into<PageId>, element_id: impl Into<ElementId>) -> Self {
        Self {
            page_id: page_id.into(),
            element_id: element_id.into(),
        }
    }
}

/// Stored state of one checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckerResult {
    /// User marked the issue as resolved
    pub resolved_manually: bool,
    /// Findings need a human decision
    pub requires_manual_review: bool,
    /// Failing elements; `None` for checkers without automatic detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_elements: Option<Vec<InvalidElement>>,
}

impl CheckerResult {
    /// Number of failing elements.
    pub fn invalid_count(&self) -> usize {
        self.invalid_elements.as_ref().map_or(0, Vec::len)
    }

    /// Check whether the checker currently passes.
    pub fn passes(&self) -> bool {
        self.resolved_manually || (!self.requires_manual_review && self.invalid_count() == 0)
    }
}

/// Partial update for one checker; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerResultPatch {
    /// New resolved flag
    pub resolved_manually: Option<bool>,
    /// New manual review flag
    pub requires_manual_review: Option<bool>,
    /// New invalid-element list (replaces the current list)
    pub invalid_elements: Option<Vec<InvalidElement>>,
}

impl CheckerResultPatch {
    /// Patch that only replaces the invalid-element list.
    pub fn with_invalid_elements(invalid_elements: Vec<InvalidElement>) -> Self {
        Self {
            invalid_elements: Some(invalid_elements),
            ..Default::default()
        }
    }

    /// Patch removing one element from `current`'s list, e.g. after the user
    /// fixed it.
    pub fn without_element(current: &CheckerResult, element: &InvalidElement) -> Self {
        Self {
            invalid_elements: current
                .invalid_elements
                .as_ref()
                .map(|list| list.iter().filter(|e| *e != element).cloned().collect()),
            ..Default::default()
        }
    }

    /// Apply this patch to `current` for checker `name`.
    ///
    /// Invalid-element lists are ignored for checkers that do not report them.
    pub fn apply(&self, name: CheckerName, current: &CheckerResult) -> CheckerResult {
        let mut merged = current.clone();
        if let Some(resolved) = self.resolved_manually {
            merged.resolved_manually = resolved;
        }
        if let Some(review) = self.requires_manual_review {
            merged.requires_manual_review = review;
        }
        if let Some(list) = &self.invalid_elements {
            if name.supports_invalid_elements() {
                merged.invalid_elements = Some(list.clone());
            } else {
                log::debug!("Ignoring invalid elements for {} checker", name);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_name_round_trip() {
        for name in CheckerName::ALL {
            assert_eq!(CheckerName::from_name(name.as_str()), Some(name));
            let json = serde_json::to_value(name).unwrap();
            assert_eq!(json, name.as_str());
        }
        assert_eq!(CheckerName::from_name("spelling"), None);
    }

    #[test]
    fn test_default_results_by_kind() {
        let alt = CheckerName::AltText.default_result();
        assert_eq!(alt.invalid_elements, Some(vec![]));
        assert!(!alt.resolved_manually);
        assert!(!alt.requires_manual_review);

        let manual = CheckerName::ReadingOrder.default_result();
        assert_eq!(manual.invalid_elements, None);
        assert_eq!(CheckerName::DocumentLanguage.default_result().invalid_elements, None);
    }

    #[test]
    fn test_patch_ignores_list_for_manual_checker() {
        let patch = CheckerResultPatch::with_invalid_elements(vec![InvalidElement::new("p1", "x")]);
        let current = CheckerName::ReadingOrder.default_result();
        assert_eq!(patch.apply(CheckerName::ReadingOrder, &current), current);
    }

    #[test]
    fn test_without_element() {
        let current = CheckerResult {
            resolved_manually: false,
            requires_manual_review: false,
            invalid_elements: Some(vec![InvalidElement::new("p1", "a"), InvalidElement::new("p1", "b")]),
        };
        let patch = CheckerResultPatch::without_element(&current, &InvalidElement::new("p1", "a"));
        let next = patch.apply(CheckerName::AltText, &current);
        assert_eq!(next.invalid_elements, Some(vec![InvalidElement::new("p1", "b")]));
    }

    #[test]
    fn test_passes() {
        let mut result = CheckerName::Links.default_result();
        assert!(result.passes());
        result.requires_manual_review = true;
        assert!(!result.passes());
        result.resolved_manually = true;
        assert!(result.passes());
    }
}
