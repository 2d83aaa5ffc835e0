// Positional edit model for the remote document.
//
// Offsets are UTF-16 code units, the unit the document service uses
// for its structural indices. An offset is valid only against the
// snapshot it was computed from: any edit applied at or before it
// shifts its true target, while edits strictly after it leave it
// intact.

pub mod sequential;
pub mod table;

use thiserror::Error;

/// Offset into the document's linear content stream, in UTF-16 code
/// units.
pub type DocumentPosition = u32;

/// Character style applied over a half-open range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub font_size_pt: u16,
    pub font_family: String,
}

impl TextStyle {
    /// Style of the report heading line.
    pub fn heading() -> Self {
        Self { bold: true, font_size_pt: 20, font_family: "Arial".to_string() }
    }
}

/// One positional edit against the remote document.
///
/// Operations are plain values. A batch applies them in list order,
/// so each offset must account for every earlier operation in the
/// same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    InsertText { at: DocumentPosition, text: String },
    InsertPageBreak { at: DocumentPosition },
    SetTextStyle { start: DocumentPosition, end: DocumentPosition, style: TextStyle },
    InsertTable { at: DocumentPosition, rows: u32, columns: u32 },
    /// Mark the paragraph range as a bulleted list.
    CreateBullets { start: DocumentPosition, end: DocumentPosition },
}

/// Fatal planning failures. None of these are retryable: the planner
/// has no model for table shapes other than the one it created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("table read-back returned {actual} cell offsets, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("table cell offsets are not strictly increasing at row {row}")]
    CellOrderMismatch { row: usize },

    #[error("table row {row} has {actual} columns, expected 1")]
    ColumnCountMismatch { row: usize, actual: usize },
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

#[cfg(test)]
mod tests {
    use super::utf16_len;

    #[test]
    fn utf16_len_counts_code_units_not_bytes() {
        assert_eq!(utf16_len("abc"), 3);
        // Three bytes in UTF-8, one code unit in UTF-16.
        assert_eq!(utf16_len("•"), 1);
        // Astral-plane emoji take a surrogate pair.
        assert_eq!(utf16_len("🆕"), 2);
        assert_eq!(utf16_len("✅ done"), 6);
    }
}
