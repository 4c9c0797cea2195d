//! Structure tree traversal.
//!
//! Pre-order, left-to-right traversal of the tree gives the reading order.

use super::parser::parse_structure_tree;
use super::types::{NodeContent, NodeId, StructTree};
use crate::elements::ElementId;
use serde_json::Value;

/// Single-pass iterator over the element ids below a node, in reading order.
#[derive(Debug)]
pub struct Flatten<'a> {
    tree: &'a StructTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            match &self.tree.node(id)?.content {
                NodeContent::Element(element_id) => return Some(element_id),
                NodeContent::Children(children) => {
                    self.stack.extend(children.iter().rev().copied());
                },
            }
        }
        None
    }
}

/// Flatten the subtree at `node` into reading order.
///
/// An unknown handle yields nothing.
pub fn flatten(tree: &StructTree, node: NodeId) -> Flatten<'_> {
    let stack = if tree.node(node).is_some() {
        vec![node]
    } else {
        Vec::new()
    };
    Flatten { tree, stack }
}

/// Flatten a tree still in its serialized 3-tuple form.
///
/// Malformed input (missing, not an array, root not a container) yields an
/// empty list.
pub fn flatten_value(value: &Value) -> Vec<ElementId> {
    match parse_structure_tree(value) {
        Some(tree) => flatten(&tree, tree.root()).cloned().collect(),
        None => Vec::new(),
    }
}

/// Find the first leaf (pre-order) referencing `target`.
///
/// Returns the node handle, usable for later edits. An empty `target` returns
/// `None` without traversing.
pub fn find_node(tree: &StructTree, target: &str) -> Option<NodeId> {
    if target.is_empty() || !tree.node(tree.root())?.is_container() {
        return None;
    }
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match &tree.node(id)?.content {
            NodeContent::Element(element_id) if element_id.as_str() == target => return Some(id),
            NodeContent::Element(_) => {},
            NodeContent::Children(children) => stack.extend(children.iter().rev().copied()),
        }
    }
    None
}

/// Find the parent container and child index of the first leaf (pre-order)
/// referencing `target`.
pub fn find_parent(tree: &StructTree, target: &str) -> Option<(NodeId, usize)> {
    if target.is_empty() {
        return None;
    }
    find_parent_in(tree, tree.root(), target)
}

fn find_parent_in(tree: &StructTree, container: NodeId, target: &str) -> Option<(NodeId, usize)> {
    for (index, child) in tree.children(container).iter().enumerate() {
        match &tree.node(*child)?.content {
            NodeContent::Element(element_id) if element_id.as_str() == target => {
                return Some((container, index));
            },
            NodeContent::Element(_) => {},
            NodeContent::Children(_) => {
                if let Some(found) = find_parent_in(tree, *child, target) {
                    return Some(found);
                }
            },
        }
    }
    None
}
