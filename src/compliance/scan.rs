//! Run every checker over a document and feed the results into a store.

use super::alt_text::check_alt_text;
use super::color_contrast::{check_color_contrast, ContrastScorer};
use super::heading_order::check_heading_order;
use super::language::{detect_document_language, LanguageDetector};
use super::links::check_links;
use super::store::{Action, ResultStore};
use super::table_heading::{check_table_heading, has_tables};
use super::text_size::check_text_size;
use super::types::{CheckerName, CheckerResultPatch};
use crate::config::{CheckerConfig, PageDimensions};
use crate::elements::{build_page_map, Document, ElementCatalog, PageId, PageToElementsMap};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Output of one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Update per checker that ran
    pub results: IndexMap<CheckerName, CheckerResultPatch>,
    /// Detected document language, when a detector was supplied
    pub language: Option<String>,
}

impl ScanReport {
    /// Total number of invalid elements across checkers.
    pub fn invalid_count(&self) -> usize {
        self.results
            .values()
            .map(|patch| patch.invalid_elements.as_ref().map_or(0, Vec::len))
            .sum()
    }
}

/// Runs the checkers.
///
/// Color contrast and document language only run when the host supplies the
/// corresponding external service.
pub struct Scanner<'a> {
    config: CheckerConfig,
    contrast_scorer: Option<&'a dyn ContrastScorer>,
    language_detector: Option<&'a dyn LanguageDetector>,
    page_dimensions: HashMap<PageId, PageDimensions>,
}

impl Default for Scanner<'_> {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl<'a> Scanner<'a> {
    /// Create a scanner with the given configuration.
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            config,
            contrast_scorer: None,
            language_detector: None,
            page_dimensions: HashMap::new(),
        }
    }

    /// Enable the color contrast checker.
    pub fn with_contrast_scorer(mut self, scorer: &'a dyn ContrastScorer) -> Self {
        self.contrast_scorer = Some(scorer);
        self
    }

    /// Enable the document language checker.
    pub fn with_language_detector(mut self, detector: &'a dyn LanguageDetector) -> Self {
        self.language_detector = Some(detector);
        self
    }

    /// Set the size of one page for contrast sampling.
    pub fn with_page_dimensions(mut self, page_id: impl Into<PageId>, dimensions: PageDimensions) -> Self {
        self.page_dimensions.insert(page_id.into(), dimensions);
        self
    }

    /// Scan a document.
    pub fn scan(&self, document: &Document) -> ScanReport {
        let page_map = build_page_map(document);
        self.scan_page_map(&page_map, &document.elements)
    }

    /// Scan a prepared page map.
    pub fn scan_page_map(&self, page_map: &PageToElementsMap, catalog: &ElementCatalog) -> ScanReport {
        let mut report = ScanReport::default();

        report.results.insert(
            CheckerName::AltText,
            CheckerResultPatch::with_invalid_elements(check_alt_text(page_map)),
        );
        report.results.insert(
            CheckerName::HeadingOrder,
            CheckerResultPatch::with_invalid_elements(check_heading_order(page_map, catalog)),
        );

        let links = check_links(page_map);
        report.results.insert(
            CheckerName::Links,
            CheckerResultPatch {
                requires_manual_review: Some(!links.is_empty()),
                invalid_elements: Some(links),
                ..Default::default()
            },
        );

        let tables = if has_tables(page_map) {
            check_table_heading(page_map)
        } else {
            Vec::new()
        };
        report.results.insert(
            CheckerName::TableHeading,
            CheckerResultPatch {
                requires_manual_review: Some(!tables.is_empty()),
                invalid_elements: Some(tables),
                ..Default::default()
            },
        );

        report.results.insert(
            CheckerName::TextSize,
            CheckerResultPatch::with_invalid_elements(check_text_size(page_map, self.config.min_font_size)),
        );

        if let Some(scorer) = self.contrast_scorer {
            report.results.insert(
                CheckerName::ColorContrast,
                CheckerResultPatch::with_invalid_elements(check_color_contrast(
                    page_map,
                    &self.page_dimensions,
                    scorer,
                    &self.config,
                )),
            );
        }

        if let Some(detector) = self.language_detector {
            let language = detect_document_language(page_map, catalog, detector);
            report.results.insert(
                CheckerName::DocumentLanguage,
                CheckerResultPatch {
                    requires_manual_review: Some(language.is_none()),
                    ..Default::default()
                },
            );
            report.language = language;
        }

        log::debug!(
            "Scanned {} pages: {} checkers, {} invalid elements",
            page_map.len(),
            report.results.len(),
            report.invalid_count()
        );
        report
    }

    /// Scan a document and apply the results, one update per checker.
    pub fn scan_into(&self, document: &Document, store: &mut ResultStore) -> ScanReport {
        let report = self.scan(document);
        for (name, patch) in &report.results {
            store.dispatch(&Action::update(*name, patch.clone()));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementData, Page, TableElement, TextElement, VisualElement};
    use crate::structure::StructTree;

    fn document() -> Document {
        let mut tree = StructTree::new("page");
        let root = tree.root();
        for id in ["image-1", "text-1", "table-1"] {
            let leaf = tree.add_leaf("div", id);
            tree.append_child(root, leaf).unwrap();
        }
        let elements = ElementCatalog::new()
            .with("image-1", ElementData::Image(VisualElement::default()))
            .with("text-1", ElementData::Text(TextElement::heading("h2", "Skipped")))
            .with("table-1", ElementData::Table(TableElement::default()));
        Document {
            pages: vec![Page::new("p1", tree)],
            elements,
        }
    }

    #[test]
    fn test_scan_without_external_services() {
        let report = Scanner::default().scan(&document());
        assert!(!report.results.contains_key(&CheckerName::ColorContrast));
        assert!(!report.results.contains_key(&CheckerName::DocumentLanguage));
        assert_eq!(report.results[&CheckerName::AltText].invalid_elements.as_ref().unwrap().len(), 1);
        assert_eq!(report.results[&CheckerName::HeadingOrder].invalid_elements.as_ref().unwrap().len(), 1);
        assert_eq!(report.results[&CheckerName::TableHeading].requires_manual_review, Some(true));
        assert_eq!(report.results[&CheckerName::Links].requires_manual_review, Some(false));
        assert_eq!(report.invalid_count(), 3);
    }

    #[test]
    fn test_scan_with_language_detector() {
        let detector = |_: &str| -> Option<String> { None };
        let report = Scanner::default()
            .with_language_detector(&detector)
            .scan(&document());
        assert_eq!(report.language, None);
        assert_eq!(
            report.results[&CheckerName::DocumentLanguage].requires_manual_review,
            Some(true)
        );
    }

    #[test]
    fn test_scan_into_store() {
        let mut store = ResultStore::new();
        Scanner::default().scan_into(&document(), &mut store);
        assert_eq!(store.get(CheckerName::AltText).unwrap().invalid_count(), 1);
        assert!(store.get(CheckerName::TableHeading).unwrap().requires_manual_review);
        assert_eq!(store.get(CheckerName::ReadingOrder).unwrap().invalid_elements, None);
    }
}
