use crate::errors::{Result, SheetLinkError};
use crate::host::SpreadsheetHost;
use crate::model::FieldEntry;
use crate::notation;
use std::sync::Arc;

/// Column layout of a field tab: labels in column 1, values in column 2.
const LABEL_COL: u32 = 1;
const VALUE_COL: u32 = 2;

/// Reads tab names and two-column field lists out of a spreadsheet.
pub struct FieldExtractor {
    sheets: Arc<dyn SpreadsheetHost>,
    max_rows: u32,
}

impl FieldExtractor {
    /// `max_rows` bounds the per-tab row scan.
    pub fn new(sheets: Arc<dyn SpreadsheetHost>, max_rows: u32) -> Self {
        Self {
            sheets,
            max_rows: max_rows.max(1),
        }
    }

    /// Tab names in declaration order. `NotFound` when the spreadsheet id
    /// does not resolve.
    pub fn tabs(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        self.sheets.open_by_id(spreadsheet_id)?.sheet_names()
    }

    /// The labeled (label, value) rows of `tab`, in row order, with display
    /// values normalized and value-cell coordinates attached.
    ///
    /// Distinguishes `NotFound` (no such spreadsheet or tab) from `EmptyTab`
    /// (tab resolves but has no labeled rows); callers may treat the latter
    /// as an empty result.
    pub fn fields(&self, spreadsheet_id: &str, tab: &str) -> Result<Vec<FieldEntry>> {
        let handle = self.sheets.open_by_id(spreadsheet_id)?;
        let rows = handle.row_count(tab)?.min(self.max_rows);
        let gid = handle.sheet_gid(tab)?;

        let mut entries = Vec::new();
        if rows > 0 {
            let grid = handle.read_range(tab, 1, LABEL_COL, rows, 2)?;
            for (idx, row) in grid.iter().enumerate() {
                let label = row.first().map(String::as_str).unwrap_or("").trim();
                if label.is_empty() {
                    continue;
                }
                let raw_value = row.get(1).cloned().unwrap_or_default();
                let normalized = notation::normalize(&raw_value);
                entries.push(FieldEntry {
                    label: label.to_string(),
                    raw_value,
                    display_value: normalized.display,
                    exponent: normalized.exponent,
                    cell_row: idx as u32 + 1,
                    cell_col: VALUE_COL,
                    spreadsheet_id: spreadsheet_id.to_string(),
                    sheet_gid: gid.clone(),
                });
            }
        }

        if entries.is_empty() {
            return Err(SheetLinkError::EmptyTab(tab.to_string()));
        }
        Ok(entries)
    }
}
