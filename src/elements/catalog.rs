//! Element catalog, pages and the page-to-elements map consumed by checkers.

use super::types::{ElementId, PageId};
use super::ElementData;
use crate::error::Result;
use crate::structure::{flatten, parse_structure_tree, StructTree};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Element id to element data, owned by the host.
///
/// Entries that fail to decode are dropped with a warning; pages referencing
/// them then skip the id like any other missing element.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ElementCatalog {
    elements: HashMap<ElementId, ElementData>,
}

impl ElementCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element.
    pub fn insert(&mut self, id: impl Into<ElementId>, data: ElementData) {
        self.elements.insert(id.into(), data);
    }

    /// Builder-style insert.
    pub fn with(mut self, id: impl Into<ElementId>, data: ElementData) -> Self {
        self.insert(id, data);
        self
    }

    /// Look up an element.
    pub fn get(&self, id: &str) -> Option<&ElementData> {
        self.elements.get(id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'de> Deserialize<'de> for ElementCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = HashMap::<ElementId, Value>::deserialize(deserializer)?;
        let mut elements = HashMap::with_capacity(raw.len());
        for (id, value) in raw {
            match serde_json::from_value::<ElementData>(value) {
                Ok(data) => {
                    elements.insert(id, data);
                },
                Err(e) => log::warn!("Element {} could not be decoded, skipping: {}", id, e),
            }
        }
        Ok(Self { elements })
    }
}

fn empty_structure() -> StructTree {
    StructTree::new("page")
}

/// Decode a page's reading order, treating a malformed tree as an empty page.
fn lenient_structure<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<StructTree, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(parse_structure_tree(&value).unwrap_or_else(|| {
        log::warn!("Malformed structure tree, treating page as empty: {}", value);
        empty_structure()
    }))
}

/// One page: reading order tree plus z-order layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page id
    pub id: PageId,
    /// Reading order; empty when the host tree is malformed
    #[serde(default = "empty_structure", deserialize_with = "lenient_structure")]
    pub structure: StructTree,
    /// Z-order, bottom first; independent of reading order
    #[serde(default)]
    pub layers: Vec<ElementId>,
}

impl Page {
    /// Page whose layers follow the reading order of `structure`.
    pub fn new(id: impl Into<PageId>, structure: StructTree) -> Self {
        let layers = flatten(&structure, structure.root()).cloned().collect();
        Self {
            id: id.into(),
            structure,
            layers,
        }
    }
}

/// A document snapshot: ordered pages and the element catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<Page>,
    /// Element data
    #[serde(default)]
    pub elements: ElementCatalog,
}

impl Document {
    /// Parse a document from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An element placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// Element id
    pub element_id: ElementId,
    /// Element data
    pub data: ElementData,
}

impl PageElement {
    /// Pair an id with its data.
    pub fn new(element_id: impl Into<ElementId>, data: ElementData) -> Self {
        Self {
            element_id: element_id.into(),
            data,
        }
    }
}

/// Page id to elements in reading order, pages in document order.
pub type PageToElementsMap = IndexMap<PageId, Vec<PageElement>>;

/// Build the checkers' input from a document.
///
/// Elements are listed in structure-tree reading order. Ids with no catalog
/// entry are skipped.
pub fn build_page_map(document: &Document) -> PageToElementsMap {
    let mut map = PageToElementsMap::with_capacity(document.pages.len());
    for page in &document.pages {
        let mut elements = Vec::new();
        for id in flatten(&page.structure, page.structure.root()) {
            match document.elements.get(id.as_str()) {
                Some(data) => elements.push(PageElement {
                    element_id: id.clone(),
                    data: data.clone(),
                }),
                None => log::warn!("Page {}: element {} missing from catalog, skipping", page.id, id),
            }
        }
        log::debug!("Page {}: {} elements in reading order", page.id, elements.len());
        map.insert(page.id.clone(), elements);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{TextElement, VisualElement};

    fn sample_document() -> Document {
        let mut tree = StructTree::new("page");
        let root = tree.root();
        let leaf = tree.add_leaf("div", "image-1");
        tree.append_child(root, leaf);
        let leaf = tree.add_leaf("div", "ghost-1");
        tree.append_child(root, leaf);
        let leaf = tree.add_leaf("div", "text-1");
        tree.append_child(root, leaf);

        let elements = ElementCatalog::new()
            .with("image-1", ElementData::Image(VisualElement::decorative()))
            .with("text-1", ElementData::Text(TextElement::heading("h1", "Hi")));

        Document {
            pages: vec![Page::new("p1", tree)],
            elements,
        }
    }

    #[test]
    fn test_build_page_map_skips_missing() {
        let map = build_page_map(&sample_document());
        let ids: Vec<&str> = map["p1"].iter().map(|e| e.element_id.as_str()).collect();
        assert_eq!(ids, vec!["image-1", "text-1"]);
    }

    #[test]
    fn test_layers_do_not_affect_reading_order() {
        let mut doc = sample_document();
        let before = build_page_map(&doc);
        doc.pages[0].layers.reverse();
        let after = build_page_map(&doc);
        assert_eq!(before, after);
    }

    #[test]
    fn test_malformed_page_loads_as_empty() {
        let doc = Document::from_json_str(
            r#"{
                "pages": [
                    {"id": "p1", "structure": ["page", {}, [["div", {}, "text-1"]]]},
                    {"id": "p2", "structure": ["page", {}]},
                    {"id": "p3"}
                ],
                "elements": {"text-1": {"type": "text"}}
            }"#,
        )
        .unwrap();
        let map = build_page_map(&doc);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["p1", "p2", "p3"]);
        assert_eq!(map["p1"].len(), 1);
        assert!(map["p2"].is_empty());
        assert!(map["p3"].is_empty());
    }

    #[test]
    fn test_undecodable_entry_is_dropped() {
        let catalog: ElementCatalog = serde_json::from_str(
            r#"{"ok": {"type": "image"}, "bad": {"type": "image", "altText": 5}, "odd": 3}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("ok").is_some());
        assert!(catalog.get("bad").is_none());
    }

    #[test]
    fn test_document_json_round_trip() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).unwrap();
        let back = Document::from_json_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
