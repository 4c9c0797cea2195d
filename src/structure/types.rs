//! Types for reading-order structure trees.
//!
//! Nodes live in an arena owned by [`StructTree`] and are addressed by
//! [`NodeId`]. Detaching a node leaves it in the arena so it can be
//! reattached elsewhere by handle.

use crate::elements::ElementId;
use serde_json::{Map, Value};

/// Handle of a node inside one [`StructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Third slot of a structure node: child nodes or a single element id.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// Container node
    Children(Vec<NodeId>),
    /// Leaf node referencing one element
    Element(ElementId),
}

/// A structure tree node: `(tag, attributes, children | element id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructNode {
    /// Container tag (e.g. `"div"`, `"section"`)
    pub tag: String,
    /// Free-form attributes
    pub attributes: Map<String, Value>,
    /// Children or element reference
    pub content: NodeContent,
}

impl StructNode {
    /// Check if this node holds children.
    pub fn is_container(&self) -> bool {
        matches!(self.content, NodeContent::Children(_))
    }

    /// Element id of a leaf node.
    pub fn element_id(&self) -> Option<&ElementId> {
        match &self.content {
            NodeContent::Element(id) => Some(id),
            NodeContent::Children(_) => None,
        }
    }

    /// Children of a container node; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match &self.content {
            NodeContent::Children(children) => children,
            NodeContent::Element(_) => &[],
        }
    }
}

/// Reading-order tree of one page, rooted at a container node.
#[derive(Debug, Clone)]
pub struct StructTree {
    nodes: Vec<StructNode>,
    root: NodeId,
}

impl StructTree {
    /// Create a tree with an empty root container.
    pub fn new(root_tag: impl Into<String>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.add_container(root_tag);
        tree
    }

    /// Root container handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&StructNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut StructNode> {
        self.nodes.get_mut(id.index())
    }

    /// Children of `id`; empty for leaves and unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(StructNode::children).unwrap_or(&[])
    }

    pub(crate) fn children_mut(&mut self, id: NodeId) -> Option<&mut Vec<NodeId>> {
        match &mut self.node_mut(id)?.content {
            NodeContent::Children(children) => Some(children),
            NodeContent::Element(_) => None,
        }
    }

    /// Allocate a detached container node.
    pub fn add_container(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(StructNode {
            tag: tag.into(),
            attributes: Map::new(),
            content: NodeContent::Children(Vec::new()),
        })
    }

    /// Allocate a detached leaf node referencing `element_id`.
    pub fn add_leaf(&mut self, tag: impl Into<String>, element_id: impl Into<ElementId>) -> NodeId {
        self.push(StructNode {
            tag: tag.into(),
            attributes: Map::new(),
            content: NodeContent::Element(element_id.into()),
        })
    }

    pub(crate) fn push(&mut self, node: StructNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append `child` to the container `parent`.
    ///
    /// Returns `None` if `parent` is not a container, either handle is unknown,
    /// or the append would make a node its own ancestor.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Option<()> {
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return None;
        }
        self.children_mut(parent)?.push(child);
        Some(())
    }

    /// Set an attribute on a node.
    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: impl Into<Value>) -> Option<()> {
        self.node_mut(id)?.attributes.insert(key.to_string(), value.into());
        Some(())
    }

    /// Check whether `node` is `ancestor` or lies below it.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == node {
            return true;
        }
        let mut stack = self.children(ancestor).to_vec();
        while let Some(current) = stack.pop() {
            if current == node {
                return true;
            }
            stack.extend_from_slice(self.children(current));
        }
        false
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        super::traversal::flatten(self, self.root).count()
    }
}

impl PartialEq for StructTree {
    /// Trees are equal when their reachable structure is equal; arena layout
    /// and detached nodes are ignored.
    fn eq(&self, other: &Self) -> bool {
        nodes_equal(self, self.root, other, other.root)
    }
}

fn nodes_equal(a: &StructTree, a_id: NodeId, b: &StructTree, b_id: NodeId) -> bool {
    let (Some(a_node), Some(b_node)) = (a.node(a_id), b.node(b_id)) else {
        return false;
    };
    if a_node.tag != b_node.tag || a_node.attributes != b_node.attributes {
        return false;
    }
    match (&a_node.content, &b_node.content) {
        (NodeContent::Element(x), NodeContent::Element(y)) => x == y,
        (NodeContent::Children(xs), NodeContent::Children(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| nodes_equal(a, *x, b, *y))
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_container_root() {
        let tree = StructTree::new("page");
        let root = tree.node(tree.root()).unwrap();
        assert!(root.is_container());
        assert_eq!(root.tag, "page");
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_node_ids_index_the_arena() {
        let mut tree = StructTree::new("page");
        assert_eq!(tree.root().index(), 0);
        for expected in 1..=300 {
            let id = tree.add_leaf("div", format!("e{}", expected));
            assert_eq!(id.index(), expected);
            assert_eq!(tree.node(id).unwrap().tag, "div");
        }
    }

    #[test]
    fn test_append_child_rejects_leaf_parent() {
        let mut tree = StructTree::new("page");
        let leaf = tree.add_leaf("div", "a");
        let other = tree.add_leaf("div", "b");
        assert!(tree.append_child(leaf, other).is_none());
    }

    #[test]
    fn test_append_child_rejects_cycle() {
        let mut tree = StructTree::new("page");
        let root = tree.root();
        let section = tree.add_container("section");
        tree.append_child(root, section).unwrap();
        assert!(tree.append_child(section, root).is_none());
        assert!(tree.append_child(section, section).is_none());
    }

    #[test]
    fn test_equality_ignores_detached_nodes() {
        let mut a = StructTree::new("page");
        let root = a.root();
        let leaf = a.add_leaf("div", "x");
        a.append_child(root, leaf).unwrap();

        let mut b = StructTree::new("page");
        b.add_leaf("div", "orphan");
        let root = b.root();
        let leaf = b.add_leaf("div", "x");
        b.append_child(root, leaf).unwrap();

        assert_eq!(a, b);
    }
}
