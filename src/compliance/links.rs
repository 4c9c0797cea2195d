//! Link presence check.
//!
//! Links are a document-level trigger for manual review, so the scan stops at
//! the first text or table element containing a link mark.

use super::types::InvalidElement;
use crate::elements::{PageToElementsMap, LINK_MARK};

/// Return the first element (page then reading order) that contains a link.
pub fn check_links(page_map: &PageToElementsMap) -> Vec<InvalidElement> {
    for (page_id, elements) in page_map {
        for element in elements {
            if !element.data.element_type().has_rich_text() {
                continue;
            }
            let has_link = element
                .data
                .rich_content()
                .is_some_and(|content| content.has_mark(LINK_MARK));
            if has_link {
                return vec![InvalidElement::new(page_id.clone(), element.element_id.clone())];
            }
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementData, Mark, PageElement, RichNode, TableElement, TextElement};

    fn linked_text() -> ElementData {
        ElementData::Text(TextElement::new(RichNode::doc(vec![RichNode::paragraph(vec![
            RichNode::marked_text("docs", vec![Mark::link("https://example.com")]),
        ])])))
    }

    #[test]
    fn test_stops_at_first_link() {
        let mut map = PageToElementsMap::new();
        map.insert(
            "p1".to_string(),
            vec![
                PageElement::new("plain", ElementData::Text(TextElement::heading("p", "x"))),
                PageElement::new("first", linked_text()),
            ],
        );
        map.insert("p2".to_string(), vec![PageElement::new("second", linked_text())]);

        assert_eq!(check_links(&map), vec![InvalidElement::new("p1", "first")]);
    }

    #[test]
    fn test_links_inside_tables() {
        let table = ElementData::Table(TableElement {
            prose_mirror_data: Some(RichNode::doc(vec![RichNode::new(
                "table",
                vec![RichNode::new(
                    "tableRow",
                    vec![RichNode::new(
                        "tableCell",
                        vec![RichNode::paragraph(vec![RichNode::marked_text(
                            "go",
                            vec![Mark::link("#")],
                        )])],
                    )],
                )],
            )])),
            ..Default::default()
        });
        let mut map = PageToElementsMap::new();
        map.insert("p1".to_string(), vec![PageElement::new("table-1", table)]);
        assert_eq!(check_links(&map).len(), 1);
    }

    #[test]
    fn test_no_links() {
        let mut map = PageToElementsMap::new();
        map.insert(
            "p1".to_string(),
            vec![PageElement::new("plain", ElementData::Text(TextElement::heading("p", "x")))],
        );
        assert!(check_links(&map).is_empty());
    }
}
