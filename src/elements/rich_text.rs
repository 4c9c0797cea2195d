//! ProseMirror-shaped rich content.
//!
//! Only the parts the checkers need are modelled: node type, text, children,
//! marks and free-form attributes.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mark type of hyperlinks.
pub const LINK_MARK: &str = "link";

/// Mark type carrying font size, color and weight.
pub const TEXT_STYLE_MARK: &str = "textStyle";

lazy_static! {
    static ref LEADING_INTEGER: Regex = Regex::new(r"^\s*(\d+)").unwrap();
}

/// Parse a CSS-ish font size such as `"14px"` or `"12.5pt"` to its integer part.
pub fn parse_font_size(value: &str) -> Option<u32> {
    LEADING_INTEGER
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// A formatting mark attached to a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Mark type (e.g. `"link"`, `"textStyle"`)
    #[serde(rename = "type")]
    pub mark_type: String,
    /// Mark attributes
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

impl Mark {
    /// Create a mark without attributes.
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            attrs: Map::new(),
        }
    }

    /// Link mark pointing at `href`.
    pub fn link(href: &str) -> Self {
        Self::new(LINK_MARK).with_attr("href", href)
    }

    /// Text style mark with the given font size (e.g. `"14px"`).
    pub fn font_size(size: &str) -> Self {
        Self::new(TEXT_STYLE_MARK).with_attr("fontSize", size)
    }

    /// Add an attribute.
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Check whether this is a text style mark.
    pub fn is_text_style(&self) -> bool {
        self.mark_type == TEXT_STYLE_MARK
    }

    /// String attribute, if present.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Integer font size from `attrs.fontSize`, string or numeric.
    pub fn parsed_font_size(&self) -> Option<u32> {
        match self.attrs.get("fontSize")? {
            Value::String(s) => parse_font_size(s),
            Value::Number(n) => n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u32),
            _ => None,
        }
    }

    /// Color from `attrs.color`, ignoring empty strings.
    pub fn color(&self) -> Option<&str> {
        self.attr_str("color").filter(|c| !c.is_empty())
    }

    /// Font weight from `attrs.fontWeight`, string or numeric.
    pub fn font_weight(&self) -> Option<String> {
        match self.attrs.get("fontWeight")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A rich content node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichNode {
    /// Node type (e.g. `"doc"`, `"paragraph"`, `"text"`, `"tableHeader"`)
    #[serde(rename = "type")]
    pub node_type: String,
    /// Text of a text leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<RichNode>,
    /// Marks on a text leaf
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    /// Node attributes
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

impl RichNode {
    /// Container node of the given type.
    pub fn new(node_type: impl Into<String>, content: Vec<RichNode>) -> Self {
        Self {
            node_type: node_type.into(),
            text: None,
            content,
            marks: Vec::new(),
            attrs: Map::new(),
        }
    }

    /// Document root.
    pub fn doc(content: Vec<RichNode>) -> Self {
        Self::new("doc", content)
    }

    /// Paragraph.
    pub fn paragraph(content: Vec<RichNode>) -> Self {
        Self::new("paragraph", content)
    }

    /// Unmarked text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::marked_text(text, Vec::new())
    }

    /// Text leaf with marks.
    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            node_type: "text".to_string(),
            text: Some(text.into()),
            content: Vec::new(),
            marks,
            attrs: Map::new(),
        }
    }

    /// Check whether any node in this subtree carries a mark of `mark_type`.
    pub fn has_mark(&self, mark_type: &str) -> bool {
        self.marks.iter().any(|m| m.mark_type == mark_type)
            || self.content.iter().any(|child| child.has_mark(mark_type))
    }

    /// Text leaves with non-empty text, in document order.
    pub fn text_leaves(&self) -> Vec<&RichNode> {
        let mut leaves = Vec::new();
        collect_text_leaves(self, &mut leaves);
        leaves
    }

    /// Plain text of this subtree; block boundaries become single spaces.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        push_plain_text(self, &mut out);
        out.trim().to_string()
    }
}

fn collect_text_leaves<'a>(node: &'a RichNode, out: &mut Vec<&'a RichNode>) {
    if let Some(text) = &node.text {
        if !text.is_empty() {
            out.push(node);
        }
    }
    for child in &node.content {
        collect_text_leaves(child, out);
    }
}

fn push_plain_text(node: &RichNode, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
        return;
    }
    for child in &node.content {
        push_plain_text(child, out);
    }
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size("16px"), Some(16));
        assert_eq!(parse_font_size("12.5pt"), Some(12));
        assert_eq!(parse_font_size(" 9"), Some(9));
        assert_eq!(parse_font_size("large"), None);
        assert_eq!(parse_font_size(""), None);
    }

    #[test]
    fn test_numeric_font_size() {
        let mark = Mark::new(TEXT_STYLE_MARK).with_attr("fontSize", 14);
        assert_eq!(mark.parsed_font_size(), Some(14));
    }

    #[test]
    fn test_has_mark_descends() {
        let doc = RichNode::doc(vec![RichNode::paragraph(vec![
            RichNode::text("see "),
            RichNode::marked_text("here", vec![Mark::link("https://example.com")]),
        ])]);
        assert!(doc.has_mark(LINK_MARK));
        assert!(!doc.has_mark("bold"));
    }

    #[test]
    fn test_text_leaves_skip_empty() {
        let doc = RichNode::doc(vec![RichNode::paragraph(vec![
            RichNode::text(""),
            RichNode::text("a"),
        ])]);
        assert_eq!(doc.text_leaves().len(), 1);
    }

    #[test]
    fn test_plain_text_separates_blocks() {
        let doc = RichNode::doc(vec![
            RichNode::paragraph(vec![RichNode::text("Hel"), RichNode::text("lo")]),
            RichNode::paragraph(vec![RichNode::text("world")]),
        ]);
        assert_eq!(doc.plain_text(), "Hello world");
    }

    #[test]
    fn test_deserialize_prose_mirror_json() {
        let node: RichNode = serde_json::from_value(json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "content": [{
                    "type": "text",
                    "text": "Small",
                    "marks": [{"type": "textStyle", "attrs": {"fontSize": "10px", "color": "#777"}}]
                }]
            }]
        }))
        .unwrap();
        let leaves = node.text_leaves();
        assert_eq!(leaves[0].marks[0].parsed_font_size(), Some(10));
        assert_eq!(leaves[0].marks[0].color(), Some("#777"));
    }
}
