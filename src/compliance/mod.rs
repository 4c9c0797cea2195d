//! Accessibility checkers and their result store.
//!
//! Each checker is a pure function over a page-to-elements map and returns the
//! elements that fail it, in page order then reading order.
//!
//! ## Checkers
//!
//! - **Alt text**: shapes, icons, images, lines and charts need alt text
//!   unless decorative
//! - **Heading order**: headings must not skip levels, tracked across pages
//! - **Links**: any link triggers manual review (first one reported)
//! - **Table heading**: every table is flagged for manual review
//! - **Text size**: text below the minimum font size
//! - **Color contrast**: graded by an external [`ContrastScorer`]
//! - **Document language**: detected by an external [`LanguageDetector`]
//!
//! Results are kept in a [`ResultStore`], changed only through [`Action`]s.
//!
//! ## Example
//!
//! ```ignore
//! use canvas_a11y::compliance::{ResultStore, Scanner};
//! use canvas_a11y::elements::Document;
//!
//! let document = Document::from_json_str(&json)?;
//! let mut store = ResultStore::new();
//! let report = Scanner::default().scan_into(&document, &mut store);
//! println!("{} invalid elements", report.invalid_count());
//! ```

pub mod alt_text;
pub mod color_contrast;
pub mod heading_order;
pub mod language;
pub mod links;
pub mod scan;
pub mod store;
pub mod table_heading;
pub mod text_size;
mod types;

pub use alt_text::check_alt_text;
pub use color_contrast::{check_color_contrast, ContrastSample, ContrastScorer};
pub use heading_order::{check_heading_order, check_page_heading_order};
pub use language::{detect_document_language, extract_document_text, LanguageDetector};
pub use links::check_links;
pub use scan::{ScanReport, Scanner};
pub use store::{reduce, reduce_value, Action, CheckerState, ResultStore};
pub use table_heading::{check_table_heading, check_table_widget_heading, has_tables};
pub use text_size::check_text_size;
pub use types::{CheckerKind, CheckerName, CheckerResult, CheckerResultPatch, InvalidElement};
