//! Reading-order edits: remove, insert and drag-to-reorder.
//!
//! None of these operations touch element positions or z-order; they only
//! rearrange the structure tree.

use super::traversal::{find_node, find_parent};
use super::types::{NodeContent, NodeId, StructTree};

/// Detach the first leaf (pre-order) referencing `target` from its parent.
///
/// Returns the detached handle, or `None` with the tree unchanged if no leaf
/// matches.
pub fn remove_node(tree: &mut StructTree, target: &str) -> Option<NodeId> {
    let (parent, index) = find_parent(tree, target)?;
    let children = tree.children_mut(parent)?;
    let removed = children.remove(index);
    log::debug!("Removed node for element {} from parent {:?}", target, parent);
    Some(removed)
}

/// Insert `node` immediately before the leaf referencing `target`.
pub fn insert_node_before(tree: &mut StructTree, node: NodeId, target: &str) -> Option<()> {
    insert_relative(tree, node, target, 0)
}

/// Insert `node` immediately after the leaf referencing `target`.
pub fn insert_node_after(tree: &mut StructTree, node: NodeId, target: &str) -> Option<()> {
    insert_relative(tree, node, target, 1)
}

fn insert_relative(tree: &mut StructTree, node: NodeId, target: &str, offset: usize) -> Option<()> {
    if target.is_empty() {
        return None;
    }
    tree.node(node)?;
    let (parent, index) = locate_insertion_point(tree, tree.root(), target)?;
    if tree.is_ancestor_or_self(node, parent) {
        return None;
    }
    tree.children_mut(parent)?.insert(index + offset, node);
    Some(())
}

/// Direct children of `container` are checked before descending, then each
/// child container is searched depth-first in order.
fn locate_insertion_point(tree: &StructTree, container: NodeId, target: &str) -> Option<(NodeId, usize)> {
    let children = tree.children(container);
    let direct = children.iter().position(|child| {
        matches!(
            tree.node(*child).map(|n| &n.content),
            Some(NodeContent::Element(id)) if id.as_str() == target
        )
    });
    if let Some(index) = direct {
        return Some((container, index));
    }
    children
        .iter()
        .filter(|child| tree.node(**child).is_some_and(|n| n.is_container()))
        .find_map(|child| locate_insertion_point(tree, *child, target))
}

/// Move `source` next to `target`, returning a new tree.
///
/// The input tree is left untouched so callers can keep it for undo. Returns
/// `None` if either element is not in the tree.
///
/// Within one container, moving to an earlier sibling position lands before
/// the target and moving to a later one lands after it, so dropping onto an
/// adjacent sibling swaps the pair. Across containers `insert_before` decides.
pub fn reorder_structure_tree(
    tree: &StructTree,
    source: &str,
    target: &str,
    insert_before: bool,
) -> Option<StructTree> {
    let source_node = find_node(tree, source)?;
    let target_node = find_node(tree, target)?;
    if source_node == target_node {
        return Some(tree.clone());
    }

    let place_before = match (find_parent(tree, source), find_parent(tree, target)) {
        (Some((source_parent, source_index)), Some((target_parent, target_index)))
            if source_parent == target_parent =>
        {
            source_index > target_index
        },
        _ => insert_before,
    };

    let mut reordered = tree.clone();
    let moved = remove_node(&mut reordered, source)?;
    // Target position is resolved again against the post-removal tree.
    if place_before {
        insert_node_before(&mut reordered, moved, target)?;
    } else {
        insert_node_after(&mut reordered, moved, target)?;
    }
    log::debug!(
        "Reordered {} {} {}",
        source,
        if place_before { "before" } else { "after" },
        target
    );
    Some(reordered)
}
