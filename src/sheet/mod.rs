//! In-memory spreadsheet representation

pub mod reader;

pub use reader::read_workbook;

/// Spreadsheet contents materialized as text: ordered column names plus data
/// rows aligned positionally with them.
///
/// Invariant: every row holds exactly `columns.len()` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
