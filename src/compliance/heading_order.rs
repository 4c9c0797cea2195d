//! Heading hierarchy check.
//!
//! Headings are scanned across all pages in document order. A heading is
//! invalid when it goes more than one level deeper than the previous heading
//! (H1 followed by H3). Staying at the same level, moving up any number of
//! levels, or going exactly one level deeper is fine. The previous level
//! carries over page boundaries and is updated even after an invalid heading.

use super::types::InvalidElement;
use crate::elements::{ElementCatalog, ElementData, ElementId, PageElement, PageToElementsMap};

/// Level before any heading has been seen.
pub const INITIAL_HEADING_LEVEL: u8 = 0;

/// Check a single transition from `last_level` to `current_level`.
pub fn is_valid_heading_transition(last_level: u8, current_level: u8) -> bool {
    !(current_level > last_level && current_level != last_level + 1)
}

/// Resolve the heading level and reported id of one element.
///
/// Responsive text is resolved through its nested text component and the
/// nested id is reported. Returns `None` for non-headings and unresolvable
/// composites.
pub fn resolve_heading(element: &PageElement, catalog: &ElementCatalog) -> Option<(ElementId, u8)> {
    match &element.data {
        ElementData::Text(text) => text
            .heading_level()
            .map(|level| (element.element_id.clone(), level)),
        ElementData::ResponsiveText(composite) => {
            let Some(text_id) = composite.text_component() else {
                log::warn!(
                    "Responsive text {} has no text component, skipping",
                    element.element_id
                );
                return None;
            };
            match catalog.get(text_id.as_str()) {
                Some(ElementData::Text(text)) => {
                    text.heading_level().map(|level| (text_id.clone(), level))
                },
                _ => {
                    log::warn!(
                        "Responsive text {} references unresolvable text element {}, skipping",
                        element.element_id,
                        text_id
                    );
                    None
                },
            }
        },
        _ => None,
    }
}

/// Check one page, starting from `last_level`.
///
/// Returns the invalid headings on this page and the level to carry into the
/// next page.
pub fn check_page_heading_order(
    page_id: &str,
    elements: &[PageElement],
    catalog: &ElementCatalog,
    last_level: u8,
) -> (Vec<InvalidElement>, u8) {
    let mut invalid = Vec::new();
    let mut last_level = last_level;
    for element in elements {
        let Some((element_id, level)) = resolve_heading(element, catalog) else {
            continue;
        };
        if !is_valid_heading_transition(last_level, level) {
            log::debug!("Page {}: H{} follows H{} ({})", page_id, level, last_level, element_id);
            invalid.push(InvalidElement::new(page_id, element_id));
        }
        last_level = level;
    }
    (invalid, last_level)
}

/// Check heading order across the whole document.
pub fn check_heading_order(page_map: &PageToElementsMap, catalog: &ElementCatalog) -> Vec<InvalidElement> {
    let (invalid, _) = page_map.iter().fold(
        (Vec::new(), INITIAL_HEADING_LEVEL),
        |(mut invalid, last_level), (page_id, elements)| {
            let (page_invalid, next_level) =
                check_page_heading_order(page_id, elements, catalog, last_level);
            invalid.extend(page_invalid);
            (invalid, next_level)
        },
    );
    invalid
}
