//! Alternative text check for visual elements.

use super::types::InvalidElement;
use crate::elements::{PageToElementsMap, VisualElement};

/// A visual element passes if it is decorative or has non-empty alt text.
pub fn has_valid_alt_text(visual: &VisualElement) -> bool {
    visual.is_decorative || visual.alt_text.as_deref().is_some_and(|alt| !alt.is_empty())
}

/// Report shapes, icons, images, lines and charts without alt text.
pub fn check_alt_text(page_map: &PageToElementsMap) -> Vec<InvalidElement> {
    let mut invalid = Vec::new();
    for (page_id, elements) in page_map {
        for element in elements {
            if !element.data.element_type().is_visual() {
                continue;
            }
            let Some(visual) = element.data.visual() else {
                continue;
            };
            if !has_valid_alt_text(visual) {
                invalid.push(InvalidElement::new(page_id.clone(), element.element_id.clone()));
            }
        }
    }
    invalid
}
