//! Read a workbook's first sheet into a `SheetData` buffer
//!
//! Row 1 is the header row; every later row becomes a data row of display
//! text. A column whose header cell is blank after trimming is dropped
//! entirely, header and data both, so the remaining columns stay aligned
//! with their own values.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::SheetData;

/// Read the first sheet of the workbook at `path`.
pub fn read_workbook(path: &Path) -> Result<SheetData> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .with_context(|| format!("Workbook has no sheets: {}", path.display()))?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut sheet_rows = range.rows();
    let header = sheet_rows
        .next()
        .with_context(|| format!("Sheet '{}' has no used range", sheet_name))?;

    // Keep (physical column index, name) pairs for non-blank headers so the
    // data phase skips the same columns the header phase skipped.
    let mut kept: Vec<(usize, String)> = Vec::new();
    let mut seen = HashSet::new();
    for (idx, cell) in header.iter().enumerate() {
        let name = cell_text(cell).trim().to_string();
        if name.is_empty() {
            log::warn!("Skipping column {} of sheet '{}': blank header", idx + 1, sheet_name);
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            bail!("Duplicate column name '{}' in sheet '{}'", name, sheet_name);
        }
        kept.push((idx, name));
    }
    if kept.is_empty() {
        bail!("Sheet '{}' has no usable column headers", sheet_name);
    }

    let mut rows = Vec::new();
    for sheet_row in sheet_rows {
        let row: Vec<String> = kept
            .iter()
            .map(|(idx, _)| sheet_row.get(*idx).map(cell_text).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let columns: Vec<String> = kept.into_iter().map(|(_, name)| name).collect();
    Ok(SheetData { columns, rows })
}

/// Display text of a cell, regardless of its underlying type.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole floats render without a trailing ".0", like the cell does
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
