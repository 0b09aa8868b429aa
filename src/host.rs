//! Collaborator contracts the pipeline depends on. Every host service is a
//! trait object so tests and alternative runtimes can inject their own
//! implementations; the crate never talks to a concrete host directly.

use crate::errors::Result;
use crate::model::{Cursor, ElementId, Span};
use parking_lot::RwLock;
use std::collections::HashMap;

/// The document being edited: cursor access plus the three text operations
/// the rich-text inserter needs.
pub trait DocumentHost: Send + Sync {
    /// The live insertion point, or `None` when the document has no cursor.
    fn cursor(&self) -> Result<Option<Cursor>>;
    fn insert_text(&self, at: Cursor, text: &str) -> Result<()>;
    fn apply_link(&self, element: ElementId, range: Span, url: &str) -> Result<()>;
    fn apply_superscript(&self, element: ElementId, range: Span) -> Result<()>;
}

/// An open spreadsheet. Obtained from [`SpreadsheetHost::open_by_id`]; all
/// methods address tabs by name and fail with `NotFound` for unknown names.
pub trait SpreadsheetHandle {
    /// Tab names in declaration order.
    fn sheet_names(&self) -> Result<Vec<String>>;
    /// Number of the last row with content, 0 for an empty tab.
    fn row_count(&self, sheet_name: &str) -> Result<u32>;
    /// Cell display text for the given range, row-major. 1-based coordinates.
    fn read_range(
        &self,
        sheet_name: &str,
        row: u32,
        col: u32,
        num_rows: u32,
        num_cols: u32,
    ) -> Result<Vec<Vec<String>>>;
    /// Opaque per-tab identifier used to build cell links.
    fn sheet_gid(&self, sheet_name: &str) -> Result<String>;
}

pub trait SpreadsheetHost: Send + Sync {
    /// Resolves a spreadsheet identifier to an open handle; `NotFound` when
    /// the identifier does not resolve.
    fn open_by_id(&self, spreadsheet_id: &str) -> Result<Box<dyn SpreadsheetHandle>>;
}

/// Session-scoped key/value persistence. Used solely by the recency cache.
pub trait PropertyStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// Resolves a spreadsheet identifier to a human-readable display name.
pub trait NameResolver: Send + Sync {
    fn name_of(&self, spreadsheet_id: &str) -> Result<String>;
}

/// Process-local [`PropertyStore`], for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
