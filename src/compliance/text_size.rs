//! Minimum text size check.

use super::types::InvalidElement;
use crate::elements::{PageToElementsMap, RichNode};

/// Smallest font size set by text-style marks on non-empty text, if any.
pub fn min_font_size(content: &RichNode) -> Option<u32> {
    content
        .text_leaves()
        .into_iter()
        .flat_map(|leaf| leaf.marks.iter())
        .filter(|mark| mark.is_text_style())
        .filter_map(|mark| mark.parsed_font_size())
        .min()
}

/// Report text and table elements with any text smaller than `min_size`.
///
/// Elements without explicit font sizes pass.
pub fn check_text_size(page_map: &PageToElementsMap, min_size: u32) -> Vec<InvalidElement> {
    let mut invalid = Vec::new();
    for (page_id, elements) in page_map {
        for element in elements {
            if !element.data.element_type().has_rich_text() {
                continue;
            }
            let smallest = element.data.rich_content().and_then(min_font_size);
            if smallest.is_some_and(|size| size < min_size) {
                invalid.push(InvalidElement::new(page_id.clone(), element.element_id.clone()));
            }
        }
    }
    invalid
}
