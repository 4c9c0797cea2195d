//! Element identifiers, type tags and per-type element payloads.

use super::rich_text::RichNode;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Key under which a responsive-text composite stores its real text element.
pub const TEXT_COMPONENT_KEY: &str = "text";

/// Page identifier as supplied by the host document.
pub type PageId = String;

/// Opaque element identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the id is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Chart subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Bar chart
    #[serde(rename = "bar-chart")]
    Bar,
    /// Line chart
    #[serde(rename = "line-chart")]
    Line,
    /// Pie chart
    #[serde(rename = "pie-chart")]
    Pie,
    /// Donut chart
    #[serde(rename = "donut-chart")]
    Donut,
    /// Area chart
    #[serde(rename = "area-chart")]
    Area,
    /// Scatter plot
    #[serde(rename = "scatter-chart")]
    Scatter,
}

impl ChartKind {
    /// All chart subtypes.
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Area,
        ChartKind::Scatter,
    ];

    /// Host tag for this chart subtype.
    pub fn tag(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar-chart",
            ChartKind::Line => "line-chart",
            ChartKind::Pie => "pie-chart",
            ChartKind::Donut => "donut-chart",
            ChartKind::Area => "area-chart",
            ChartKind::Scatter => "scatter-chart",
        }
    }

    /// Parse a chart subtype tag such as `"pie-chart"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }
}

/// Element type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Rich text box
    Text,
    /// Responsive text composite
    ResponsiveText,
    /// Table
    Table,
    /// Shape
    Shape,
    /// Icon
    Icon,
    /// Image
    Image,
    /// Line
    Line,
    /// Chart of the given subtype
    Chart(ChartKind),
    /// Host widget the checkers do not model
    Other,
}

impl ElementType {
    /// Parse a host type tag (e.g. `"text"`, `"pie-chart"`).
    pub fn from_tag(tag: &str) -> Result<Self> {
        let element_type = match tag {
            "text" => ElementType::Text,
            "responsive-text" => ElementType::ResponsiveText,
            "table" => ElementType::Table,
            "shape" => ElementType::Shape,
            "icon" => ElementType::Icon,
            "image" => ElementType::Image,
            "line" => ElementType::Line,
            other => ChartKind::from_tag(other)
                .map(ElementType::Chart)
                .ok_or_else(|| Error::UnknownElementType(other.to_string()))?,
        };
        Ok(element_type)
    }

    /// Host tag for this type.
    pub fn tag(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::ResponsiveText => "responsive-text",
            ElementType::Table => "table",
            ElementType::Shape => "shape",
            ElementType::Icon => "icon",
            ElementType::Image => "image",
            ElementType::Line => "line",
            ElementType::Chart(kind) => kind.tag(),
            ElementType::Other => "other",
        }
    }

    /// Types that need alternative text unless marked decorative.
    pub fn is_visual(&self) -> bool {
        matches!(
            self,
            ElementType::Shape
                | ElementType::Icon
                | ElementType::Image
                | ElementType::Line
                | ElementType::Chart(_)
        )
    }

    /// Types whose rich content is scanned for links and text styles.
    pub fn has_rich_text(&self) -> bool {
        matches!(self, ElementType::Text | ElementType::Table)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Position and size in page pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Accessibility facts shared by shapes, icons, images, lines and charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualElement {
    /// Element position
    pub rect: Rect,
    /// Alternative text, if any
    pub alt_text: Option<String>,
    /// Purely decorative elements need no alternative text
    #[serde(deserialize_with = "null_as_false")]
    pub is_decorative: bool,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl VisualElement {
    /// Visual element carrying the given alternative text.
    pub fn with_alt_text(alt_text: impl Into<String>) -> Self {
        Self {
            alt_text: Some(alt_text.into()),
            ..Default::default()
        }
    }

    /// Visual element flagged as decorative.
    pub fn decorative() -> Self {
        Self {
            is_decorative: true,
            ..Default::default()
        }
    }
}

/// Chart payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    /// Chart subtype
    pub chart_type: ChartKind,
    /// Alt-text facts
    #[serde(flatten)]
    pub visual: VisualElement,
}

/// Rich text box payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextElement {
    /// Element position
    pub rect: Rect,
    /// Block tag such as `"p"` or `"h2"`
    pub text_tag: Option<String>,
    /// Rich content
    pub prose_mirror_data: Option<RichNode>,
}

impl TextElement {
    /// Text element holding a single paragraph.
    pub fn new(content: RichNode) -> Self {
        Self {
            rect: Rect::default(),
            text_tag: Some("p".to_string()),
            prose_mirror_data: Some(content),
        }
    }

    /// Text element tagged as a heading with plain text content.
    pub fn heading(tag: &str, text: &str) -> Self {
        Self {
            rect: Rect::default(),
            text_tag: Some(tag.to_string()),
            prose_mirror_data: Some(RichNode::doc(vec![RichNode::paragraph(vec![
                RichNode::text(text),
            ])])),
        }
    }

    /// Heading level 1-6 derived from the tag, `None` for non-headings.
    pub fn heading_level(&self) -> Option<u8> {
        let tag = self.text_tag.as_deref()?.trim();
        let mut chars = tag.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('h' | 'H'), Some(digit @ '1'..='6'), None) => Some(digit as u8 - b'0'),
            _ => None,
        }
    }
}

/// Responsive text composite payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponsiveTextElement {
    /// Element position
    pub rect: Rect,
    /// Component key to nested element id
    pub component_widget_id_map: HashMap<String, ElementId>,
}

impl ResponsiveTextElement {
    /// Composite whose text component is `text_id`.
    pub fn wrapping(text_id: impl Into<ElementId>) -> Self {
        let mut component_widget_id_map = HashMap::new();
        component_widget_id_map.insert(TEXT_COMPONENT_KEY.to_string(), text_id.into());
        Self {
            rect: Rect::default(),
            component_widget_id_map,
        }
    }

    /// Id of the nested text element, if present.
    pub fn text_component(&self) -> Option<&ElementId> {
        self.component_widget_id_map.get(TEXT_COMPONENT_KEY)
    }
}

/// Table payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableElement {
    /// Element position
    pub rect: Rect,
    /// Rich content holding the table rows
    pub prose_mirror_data: Option<RichNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_from_tag() {
        assert_eq!(ElementType::from_tag("text").unwrap(), ElementType::Text);
        assert_eq!(
            ElementType::from_tag("responsive-text").unwrap(),
            ElementType::ResponsiveText
        );
        assert_eq!(
            ElementType::from_tag("scatter-chart").unwrap(),
            ElementType::Chart(ChartKind::Scatter)
        );
        assert!(ElementType::from_tag("video").is_err());
        assert!(ElementType::from_tag("other").is_err());
    }

    #[test]
    fn test_tag_round_trip() {
        for kind in ChartKind::ALL {
            let ty = ElementType::Chart(kind);
            assert_eq!(ElementType::from_tag(ty.tag()).unwrap(), ty);
        }
    }

    #[test]
    fn test_is_visual() {
        assert!(ElementType::Image.is_visual());
        assert!(ElementType::Line.is_visual());
        assert!(ElementType::Chart(ChartKind::Bar).is_visual());
        assert!(!ElementType::Text.is_visual());
        assert!(!ElementType::Table.is_visual());
        assert!(!ElementType::Other.is_visual());
        assert!(!ElementType::Other.has_rich_text());
    }

    #[test]
    fn test_chart_kind_from_tag() {
        assert_eq!(ChartKind::from_tag("donut-chart"), Some(ChartKind::Donut));
        assert_eq!(ChartKind::from_tag("chart"), None);
    }

    #[test]
    fn test_null_decorative_flag_reads_as_false() {
        let visual: VisualElement =
            serde_json::from_value(serde_json::json!({"altText": "", "isDecorative": null})).unwrap();
        assert!(!visual.is_decorative);
        let visual: VisualElement = serde_json::from_value(serde_json::json!({"isDecorative": true})).unwrap();
        assert!(visual.is_decorative);
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(TextElement::heading("h1", "a").heading_level(), Some(1));
        assert_eq!(TextElement::heading("H6", "a").heading_level(), Some(6));
        assert_eq!(TextElement::heading("h7", "a").heading_level(), None);
        assert_eq!(TextElement::heading("p", "a").heading_level(), None);
        assert_eq!(TextElement::heading("h10", "a").heading_level(), None);
        assert_eq!(TextElement::default().heading_level(), None);
    }

    #[test]
    fn test_responsive_text_component() {
        let composite = ResponsiveTextElement::wrapping("text-9");
        assert_eq!(composite.text_component().map(|id| id.as_str()), Some("text-9"));
        assert!(ResponsiveTextElement::default().text_component().is_none());
    }
}
