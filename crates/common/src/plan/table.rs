// Snapshot-reverse append planner: table skeleton, read-back, fill.
//
// The service assigns cell offsets when it creates the table, so the
// planner cannot predict them. Phase 1 creates the skeleton; a fresh
// read after it captures one locator per row; Phase 2 fills cells
// strictly in descending locator order. Inserting at an offset shifts
// only the offsets after it in the same snapshot, so highest-first
// keeps every still-unapplied locator valid. Ascending order would
// invalidate every locator after the first.

use crate::plan::{utf16_len, DocumentPosition, EditOperation, PlanError, TextStyle};
use crate::report::{ReportContent, REPORT_HEADING};

/// Rows in the report table: period header plus three sections.
pub const TABLE_ROWS: usize = 4;

/// Phase 1: page break, styled heading, and the empty table skeleton.
pub fn plan_table_skeleton(insertion_point: DocumentPosition) -> Vec<EditOperation> {
    let heading_end = insertion_point + utf16_len(REPORT_HEADING);
    vec![
        EditOperation::InsertPageBreak { at: insertion_point.saturating_sub(1) },
        EditOperation::InsertText { at: insertion_point, text: REPORT_HEADING.to_string() },
        EditOperation::SetTextStyle {
            start: insertion_point,
            end: heading_end,
            style: TextStyle::heading(),
        },
        EditOperation::InsertTable { at: heading_end, rows: TABLE_ROWS as u32, columns: 1 },
    ]
}

/// Phase 2: fill the read-back cells in descending locator order.
///
/// `cells` must be the row-ordered locators captured from one
/// document snapshot taken after the skeleton batch was applied and
/// before any Phase-2 edit. Any other shape is a fatal layout
/// mismatch, not a retryable condition.
pub fn plan_cell_fill(
    cells: &[DocumentPosition],
    content: &ReportContent,
) -> Result<Vec<EditOperation>, PlanError> {
    if cells.len() != TABLE_ROWS {
        return Err(PlanError::CellCountMismatch { expected: TABLE_ROWS, actual: cells.len() });
    }
    for (row, pair) in cells.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(PlanError::CellOrderMismatch { row: row + 1 });
        }
    }

    let texts = content.table_cells();
    Ok(texts
        .into_iter()
        .zip(cells.iter().copied())
        .rev()
        .map(|(text, at)| EditOperation::InsertText { at, text })
        .collect())
}
