//! # Canvas A11y
//!
//! Accessibility checking for documents built in a visual design editor.
//!
//! ## Core Features
//!
//! - **Structure Tree**: Per-page reading order as a tree of containers and
//!   element leaves, with flatten, lookup, removal, insertion and drag-and-drop
//!   reordering
//! - **Checkers**: Alt text, heading order, links, table headings, text size,
//!   color contrast and document language
//! - **Result Store**: Immutable checker results changed only through actions,
//!   with reference equality for no-op updates
//!
//! ## Architecture
//!
//! - **Pure Checkers**: Each checker is a function over a page-to-elements map
//! - **Pluggable Services**: Contrast grading and language detection are traits
//!   implemented by the host
//! - **Typed Elements**: Element kinds are a tagged enum, not id prefixes
//!
//! ## Quick Start
//!
//! ```ignore
//! use canvas_a11y::compliance::{ResultStore, Scanner};
//! use canvas_a11y::elements::Document;
//! use canvas_a11y::structure::reorder_structure_tree;
//!
//! let document = Document::from_json_str(&std::fs::read_to_string("doc.json")?)?;
//!
//! // Move one element in the reading order of the first page
//! let page = &document.pages[0];
//! let reordered = reorder_structure_tree(&page.structure, "image-1", "text-2", true);
//!
//! // Run the checkers
//! let mut store = ResultStore::new();
//! let report = Scanner::default().scan_into(&document, &mut store);
//! println!("{}", serde_json::to_string_pretty(&*store.state())?);
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

/// Checker configuration
pub mod config;

// Document model
pub mod elements;
/// Reading-order structure trees
pub mod structure;

// Accessibility checkers
pub mod compliance;

// Re-exports
pub use compliance::{Action, CheckerName, CheckerResult, ResultStore, Scanner};
pub use config::CheckerConfig;
pub use elements::{Document, ElementData, ElementId};
pub use error::{Error, Result};
pub use structure::{NodeId, StructTree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "canvas_a11y");
    }
}
