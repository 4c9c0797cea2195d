//! Conversion between [`StructTree`] and the nested 3-tuple JSON form.
//!
//! Each node is serialized as `[tag, {attributes}, children]` where
//! `children` is either an array of nodes or a single element id string.

use super::types::{NodeContent, NodeId, StructNode, StructTree};
use crate::elements::ElementId;
use crate::error::Error;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Parse a structure tree from its serialized form.
///
/// Returns `None` when the top-level value is not a container node. Malformed
/// nested nodes are dropped.
pub fn parse_structure_tree(value: &Value) -> Option<StructTree> {
    let (tag, attributes, slot) = split_node(value)?;
    let children = slot.as_array()?;

    let mut tree = StructTree::new(tag);
    let root = tree.root();
    if let Some(node) = tree.node_mut(root) {
        node.attributes = attributes;
    }
    for child in children {
        parse_into(&mut tree, root, child);
    }
    Some(tree)
}

fn split_node(value: &Value) -> Option<(&str, Map<String, Value>, &Value)> {
    let parts = value.as_array()?;
    if parts.len() != 3 {
        return None;
    }
    let tag = parts[0].as_str()?;
    let attributes = match &parts[1] {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        _ => return None,
    };
    Some((tag, attributes, &parts[2]))
}

fn parse_into(tree: &mut StructTree, parent: NodeId, value: &Value) {
    let Some((tag, attributes, slot)) = split_node(value) else {
        log::warn!("Skipping malformed structure node: {}", value);
        return;
    };
    let id = match slot {
        Value::String(element_id) => tree.push(StructNode {
            tag: tag.to_string(),
            attributes,
            content: NodeContent::Element(ElementId::new(element_id.as_str())),
        }),
        Value::Array(children) => {
            let id = tree.push(StructNode {
                tag: tag.to_string(),
                attributes,
                content: NodeContent::Children(Vec::new()),
            });
            for child in children {
                parse_into(tree, id, child);
            }
            id
        },
        _ => {
            log::warn!("Skipping structure node '{}' without children or element id", tag);
            return;
        },
    };
    if let Some(children) = tree.children_mut(parent) {
        children.push(id);
    }
}

impl StructTree {
    /// Serialize the reachable tree to its nested 3-tuple form.
    pub fn to_value(&self) -> Value {
        node_to_value(self, self.root())
    }

    /// Parse a tree, failing when the root is not a container node.
    pub fn from_value(value: &Value) -> crate::error::Result<Self> {
        parse_structure_tree(value).ok_or_else(|| {
            Error::InvalidStructureTree("root must be [tag, {attributes}, [children]]".to_string())
        })
    }
}

fn node_to_value(tree: &StructTree, id: NodeId) -> Value {
    let Some(node) = tree.node(id) else {
        return Value::Null;
    };
    let slot = match &node.content {
        NodeContent::Element(element_id) => Value::String(element_id.to_string()),
        NodeContent::Children(children) => {
            Value::Array(children.iter().map(|c| node_to_value(tree, *c)).collect())
        },
    };
    Value::Array(vec![
        Value::String(node.tag.clone()),
        Value::Object(node.attributes.clone()),
        slot,
    ])
}

impl Serialize for StructTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StructTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        StructTree::from_value(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_serialize() {
        let value = json!(["page", {"role": "main"}, [
            ["div", {}, "a"],
            ["section", {}, [["div", {}, "b"]]]
        ]]);
        let tree = parse_structure_tree(&value).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.to_value(), value);
    }

    #[test]
    fn test_from_value_rejects_leaf_root() {
        let err = StructTree::from_value(&json!(["page", {}, "a"])).unwrap_err();
        assert!(matches!(err, Error::InvalidStructureTree(_)));
        assert!(serde_json::from_value::<StructTree>(json!(null)).is_err());
    }

    #[test]
    fn test_null_attributes_accepted() {
        let tree = parse_structure_tree(&json!(["page", null, [["div", null, "a"]]])).unwrap();
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_malformed_children_dropped() {
        let value = json!(["page", {}, [["div", {}, "a"], ["broken"], 42, ["div", {}, 7], ["div", {}, "b"]]]);
        let tree = parse_structure_tree(&value).unwrap();
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_deserialize_rejects_leaf_root() {
        let result: Result<StructTree, _> = serde_json::from_value(json!(["div", {}, "a"]));
        assert!(result.is_err());
    }
}
