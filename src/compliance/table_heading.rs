//! Table header check.
//!
//! Every table is reported for manual review. Automatic header detection
//! ([`check_table_widget_heading`]) is kept as a diagnostic but does not
//! affect the reported list.

use super::types::InvalidElement;
use crate::elements::{ElementType, PageToElementsMap, RichNode};

const TABLE_NODE: &str = "table";
const ROW_NODE: &str = "tableRow";
const HEADER_CELL_NODE: &str = "tableHeader";

/// Check whether any page holds a table.
pub fn has_tables(page_map: &PageToElementsMap) -> bool {
    page_map
        .values()
        .flatten()
        .any(|element| element.data.element_type() == ElementType::Table)
}

/// Report every table element.
pub fn check_table_heading(page_map: &PageToElementsMap) -> Vec<InvalidElement> {
    let mut invalid = Vec::new();
    for (page_id, elements) in page_map {
        for element in elements {
            if element.data.element_type() == ElementType::Table {
                invalid.push(InvalidElement::new(page_id.clone(), element.element_id.clone()));
            }
        }
    }
    invalid
}

/// Check whether a table's first row or first column consists entirely of
/// non-empty header cells.
pub fn check_table_widget_heading(content: &RichNode) -> bool {
    let Some(table) = find_table(content) else {
        return false;
    };
    let rows: Vec<&RichNode> = table
        .content
        .iter()
        .filter(|node| node.node_type == ROW_NODE)
        .collect();
    if rows.is_empty() {
        return false;
    }

    let first_row_is_header =
        !rows[0].content.is_empty() && rows[0].content.iter().all(is_filled_header_cell);
    let first_column_is_header = rows
        .iter()
        .all(|row| row.content.first().is_some_and(is_filled_header_cell));

    first_row_is_header || first_column_is_header
}

fn find_table(node: &RichNode) -> Option<&RichNode> {
    if node.node_type == TABLE_NODE {
        return Some(node);
    }
    node.content.iter().find_map(find_table)
}

fn is_filled_header_cell(cell: &RichNode) -> bool {
    cell.node_type == HEADER_CELL_NODE && !cell.plain_text().is_empty()
}
