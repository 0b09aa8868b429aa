use crate::config::SessionConfig;
use crate::errors::{Result, SheetLinkError};
use crate::extract::FieldExtractor;
use crate::host::{DocumentHost, NameResolver, PropertyStore, SpreadsheetHost};
use crate::insert::RichTextInserter;
use crate::model::{FieldEntry, SheetRef};
use crate::recent::RecentSheets;
use crate::url;
use std::sync::Arc;

/// One user session over a document and a set of spreadsheets. Wires the
/// recency cache, the field extractor, and the rich-text inserter onto the
/// injected host services and exposes the pipeline's outward surface.
pub struct SheetLinkSession {
    recent: RecentSheets,
    extractor: FieldExtractor,
    inserter: RichTextInserter,
    names: Arc<dyn NameResolver>,
}

impl SheetLinkSession {
    pub fn new(
        config: Arc<SessionConfig>,
        sheets: Arc<dyn SpreadsheetHost>,
        names: Arc<dyn NameResolver>,
        store: Arc<dyn PropertyStore>,
        document: Arc<dyn DocumentHost>,
    ) -> Self {
        Self {
            recent: RecentSheets::new(store, &config.session, config.recent_capacity),
            extractor: FieldExtractor::new(sheets, config.max_field_rows),
            inserter: RichTextInserter::new(document),
            names,
        }
    }

    /// Resolves a spreadsheet URL to its identifier, labels it with its
    /// display name, and remembers it at the front of the recency list.
    pub fn open_sheet(&self, sheet_url: &str) -> Result<SheetRef> {
        let id = url::spreadsheet_id(sheet_url).ok_or_else(|| {
            SheetLinkError::InvalidInput(format!("no spreadsheet id in url '{sheet_url}'"))
        })?;
        let name = self.names.name_of(&id)?;
        self.recent.touch(&id, &name)
    }

    /// Recently used spreadsheets, most recent first.
    pub fn recent_sheets(&self) -> Vec<SheetRef> {
        self.recent.list()
    }

    pub fn recent_sheet_names(&self) -> Vec<String> {
        self.recent.names()
    }

    pub fn clear_recent_sheets(&self) -> Result<()> {
        self.recent.clear()
    }

    /// Tab names of a spreadsheet, in declaration order.
    pub fn tabs(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        self.extractor.tabs(spreadsheet_id)
    }

    /// Labeled field rows of one tab.
    pub fn fields(&self, spreadsheet_id: &str, tab: &str) -> Result<Vec<FieldEntry>> {
        self.extractor.fields(spreadsheet_id, tab)
    }

    /// Inserts a field's display value at the live cursor, hyperlinked to its
    /// source cell, exponent superscripted.
    pub fn insert_field(&self, entry: &FieldEntry) -> Result<()> {
        self.inserter.insert_field(entry)
    }
}
