//! Document elements as seen by the accessibility checkers.
//!
//! The host editor owns the element data; this module only models the facts
//! the checkers read from it.
//!
//! ## Design
//!
//! Every element carries an explicit type discriminant (`ElementData` is a
//! tagged enum, serialized with a `"type"` field). Checkers dispatch on
//! [`ElementData::element_type`] instead of decoding the element id.
//!
//! ## Example
//!
//! ```ignore
//! use canvas_a11y::elements::{ElementData, VisualElement};
//!
//! let image = ElementData::Image(VisualElement::with_alt_text("A red bicycle"));
//! assert!(image.element_type().is_visual());
//! ```

mod catalog;
mod rich_text;
mod types;

pub use catalog::{build_page_map, Document, ElementCatalog, Page, PageElement, PageToElementsMap};
pub use rich_text::{parse_font_size, Mark, RichNode, LINK_MARK, TEXT_STYLE_MARK};
pub use types::{
    ChartElement, ChartKind, ElementId, ElementType, PageId, Rect, ResponsiveTextElement,
    TableElement, TextElement, VisualElement, TEXT_COMPONENT_KEY,
};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Type-specific data of one element.
///
/// Chart subtype tags (`"pie-chart"`) are accepted as the `"type"` and folded
/// into `"chart"`. Unmodelled host widgets decode as [`ElementData::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "kebab-case")]
pub enum ElementData {
    /// Rich text box
    Text(TextElement),
    /// Composite that delegates to a nested text element
    ResponsiveText(ResponsiveTextElement),
    /// Table with rich cell content
    Table(TableElement),
    /// Vector shape
    Shape(VisualElement),
    /// Icon
    Icon(VisualElement),
    /// Raster image
    Image(VisualElement),
    /// Line or connector
    Line(VisualElement),
    /// Chart of any kind
    Chart(ChartElement),
    /// Any other host widget; ignored by every checker
    #[serde(other)]
    Other,
}

impl Serialize for ElementData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ElementData::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ElementData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut value = Value::deserialize(deserializer)?;
        fold_chart_tag(&mut value);
        ElementData::deserialize(value).map_err(D::Error::custom)
    }
}

/// Rewrite `{"type": "pie-chart"}` to `{"type": "chart", "chartType": "pie-chart"}`.
fn fold_chart_tag(value: &mut Value) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    let Some(kind) = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(ChartKind::from_tag)
    else {
        return;
    };
    object.insert("type".to_string(), Value::from("chart"));
    object
        .entry("chartType")
        .or_insert_with(|| Value::from(kind.tag()));
}

impl ElementData {
    /// Get the element type discriminant.
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementData::Text(_) => ElementType::Text,
            ElementData::ResponsiveText(_) => ElementType::ResponsiveText,
            ElementData::Table(_) => ElementType::Table,
            ElementData::Shape(_) => ElementType::Shape,
            ElementData::Icon(_) => ElementType::Icon,
            ElementData::Image(_) => ElementType::Image,
            ElementData::Line(_) => ElementType::Line,
            ElementData::Chart(c) => ElementType::Chart(c.chart_type),
            ElementData::Other => ElementType::Other,
        }
    }

    /// Get the position and size of this element.
    pub fn rect(&self) -> Rect {
        match self {
            ElementData::Text(t) => t.rect,
            ElementData::ResponsiveText(r) => r.rect,
            ElementData::Table(t) => t.rect,
            ElementData::Shape(v)
            | ElementData::Icon(v)
            | ElementData::Image(v)
            | ElementData::Line(v) => v.rect,
            ElementData::Chart(c) => c.visual.rect,
            ElementData::Other => Rect::default(),
        }
    }

    /// Alt-text facts for visual elements, `None` for text and tables.
    pub fn visual(&self) -> Option<&VisualElement> {
        match self {
            ElementData::Shape(v)
            | ElementData::Icon(v)
            | ElementData::Image(v)
            | ElementData::Line(v) => Some(v),
            ElementData::Chart(c) => Some(&c.visual),
            _ => None,
        }
    }

    /// Rich content of text and table elements.
    pub fn rich_content(&self) -> Option<&RichNode> {
        match self {
            ElementData::Text(t) => t.prose_mirror_data.as_ref(),
            ElementData::Table(t) => t.prose_mirror_data.as_ref(),
            _ => None,
        }
    }
}
