//! Reading-order structure trees.
//!
//! Each page owns one structure tree that defines its reading (and tab) order,
//! independently of where elements sit on the canvas or how they are layered.
//!
//! ## Structure Tree
//!
//! A node is a 3-tuple `(tag, attributes, children | element id)`:
//! - **Container**: holds an ordered list of child nodes
//! - **Leaf**: references exactly one element
//!
//! Nodes are stored in an arena owned by [`StructTree`] and addressed by
//! [`NodeId`] handles, so a node can be detached and reattached elsewhere
//! without shared references.
//!
//! ## Reading Order
//!
//! Reading order is the pre-order, left-to-right sequence of leaves (see
//! [`flatten`]).
//!
//! ## Example
//!
//! ```ignore
//! use canvas_a11y::structure::{flatten, reorder_structure_tree, StructTree};
//!
//! let tree: StructTree = serde_json::from_str(r#"["page", {}, [["div", {}, "a"], ["div", {}, "b"]]]"#)?;
//! let moved = reorder_structure_tree(&tree, "b", "a", true).unwrap();
//! let order: Vec<_> = flatten(&moved, moved.root()).collect();
//! ```

mod editor;
mod parser;
pub mod traversal;
mod types;

pub use editor::{insert_node_after, insert_node_before, remove_node, reorder_structure_tree};
pub use parser::parse_structure_tree;
pub use traversal::{find_node, find_parent, flatten, flatten_value, Flatten};
pub use types::{NodeContent, NodeId, StructNode, StructTree};
