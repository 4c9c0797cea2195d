//! Document language check backed by an external language detector.

use crate::elements::{ElementCatalog, ElementData, PageToElementsMap};

/// Code returned by detectors for undetermined language.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// External language classifier.
pub trait LanguageDetector {
    /// Detect the language of `text`, returning an ISO 639-1 style code.
    fn detect(&self, text: &str) -> Option<String>;
}

impl<F> LanguageDetector for F
where
    F: Fn(&str) -> Option<String>,
{
    fn detect(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Plain text of all text elements in reading order, joined by spaces.
///
/// Responsive text contributes its nested text element.
pub fn extract_document_text(page_map: &PageToElementsMap, catalog: &ElementCatalog) -> String {
    let mut parts = Vec::new();
    for element in page_map.values().flatten() {
        let text = match &element.data {
            ElementData::Text(text) => text.prose_mirror_data.as_ref(),
            ElementData::ResponsiveText(composite) => composite
                .text_component()
                .and_then(|id| catalog.get(id.as_str()))
                .and_then(|nested| match nested {
                    ElementData::Text(text) => text.prose_mirror_data.as_ref(),
                    _ => None,
                }),
            _ => None,
        };
        if let Some(content) = text {
            let plain = content.plain_text();
            if !plain.is_empty() {
                parts.push(plain);
            }
        }
    }
    parts.join(" ")
}

/// Detect the document language; `None` if no language can be determined.
pub fn detect_document_language(
    page_map: &PageToElementsMap,
    catalog: &ElementCatalog,
    detector: &dyn LanguageDetector,
) -> Option<String> {
    let text = extract_document_text(page_map, catalog);
    if text.trim().is_empty() {
        log::debug!("No text content, skipping language detection");
        return None;
    }
    detector
        .detect(&text)
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty() && code != UNDETERMINED_LANGUAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{PageElement, ResponsiveTextElement, TextElement, VisualElement};

    fn sample_map() -> (PageToElementsMap, ElementCatalog) {
        let catalog = ElementCatalog::new()
            .with("inner", ElementData::Text(TextElement::heading("p", "nested words")));
        let mut map = PageToElementsMap::new();
        map.insert(
            "p1".to_string(),
            vec![
                PageElement::new("t1", ElementData::Text(TextElement::heading("h1", "Hello"))),
                PageElement::new("img", ElementData::Image(VisualElement::decorative())),
                PageElement::new(
                    "r1",
                    ElementData::ResponsiveText(ResponsiveTextElement::wrapping("inner")),
                ),
            ],
        );
        (map, catalog)
    }

    #[test]
    fn test_extract_document_text() {
        let (map, catalog) = sample_map();
        assert_eq!(extract_document_text(&map, &catalog), "Hello nested words");
    }

    #[test]
    fn test_detected_language() {
        let (map, catalog) = sample_map();
        let english = |_: &str| Some("en".to_string());
        assert_eq!(detect_document_language(&map, &catalog, &english), Some("en".to_string()));
    }

    #[test]
    fn test_undetermined_language() {
        let (map, catalog) = sample_map();
        let unsure = |_: &str| Some("und".to_string());
        let nothing = |_: &str| -> Option<String> { None };
        assert_eq!(detect_document_language(&map, &catalog, &unsure), None);
        assert_eq!(detect_document_language(&map, &catalog, &nothing), None);
    }

    #[test]
    fn test_empty_document_skips_detector() {
        let called = std::cell::Cell::new(false);
        let detector = |_: &str| {
            called.set(true);
            Some("en".to_string())
        };
        let map = PageToElementsMap::new();
        assert_eq!(detect_document_language(&map, &ElementCatalog::new(), &detector), None);
        assert!(!called.get());
    }
}
