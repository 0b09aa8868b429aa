use crate::address;
use crate::errors::{Result, SheetLinkError};
use crate::host::DocumentHost;
use crate::model::{FieldEntry, InsertionSpan, Span};
use std::sync::Arc;

/// Translates a declarative [`InsertionSpan`] into the ordered host calls
/// that realize it at the live cursor.
pub struct RichTextInserter {
    doc: Arc<dyn DocumentHost>,
}

impl RichTextInserter {
    pub fn new(doc: Arc<dyn DocumentHost>) -> Self {
        Self { doc }
    }

    /// Inserts `span.text` at the cursor, links the whole inserted range to
    /// `link_url`, then superscripts the exponent sub-range if present.
    /// Purely inline; no paragraph break is introduced.
    ///
    /// `NoCursor` when the document has no insertion point; `InvalidRange`
    /// when the superscript range does not fit the span text.
    pub fn insert(&self, span: &InsertionSpan, link_url: &str) -> Result<()> {
        let text_len = span.text.chars().count();
        if let Some(sup) = span.superscript {
            if sup.start > sup.end || sup.end > text_len {
                return Err(SheetLinkError::InvalidRange {
                    start: sup.start,
                    end: sup.end,
                    len: text_len,
                });
            }
        }

        let cursor = self.doc.cursor()?.ok_or(SheetLinkError::NoCursor)?;
        self.doc.insert_text(cursor, &span.text)?;

        let inserted = Span::new(cursor.offset, cursor.offset + text_len);
        // Link first: the link pass styles the whole span and would clobber
        // a superscript attribute applied before it.
        self.doc.apply_link(cursor.element, inserted, link_url)?;
        if let Some(sup) = span.superscript {
            if !sup.is_empty() {
                self.doc
                    .apply_superscript(cursor.element, sup.shifted(cursor.offset))?;
            }
        }
        Ok(())
    }

    /// Inserts a field's display value linked back to its source cell.
    pub fn insert_field(&self, entry: &FieldEntry) -> Result<()> {
        let span = InsertionSpan {
            text: entry.display_value.clone(),
            superscript: entry.exponent,
        };
        let url = source_cell_url(
            &entry.spreadsheet_id,
            &entry.sheet_gid,
            entry.cell_row,
            entry.cell_col,
        )?;
        self.insert(&span, &url)
    }
}

/// URL of a single cell within a spreadsheet tab.
pub fn source_cell_url(spreadsheet_id: &str, gid: &str, row: u32, col: u32) -> Result<String> {
    let cell = address::cell_a1(row, col)?;
    Ok(format!(
        "https://docs.google.com/spreadsheets/d/{spreadsheet_id}/edit#gid={gid}&range={cell}"
    ))
}
