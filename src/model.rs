use serde::{Deserialize, Serialize};

/// Half-open character range `[start, end)`.
///
/// All offsets in this crate are character offsets, not byte offsets, because
/// document hosts address text by character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Translate the range by `offset`, e.g. from span-local to
    /// document-absolute coordinates.
    pub fn shifted(&self, offset: usize) -> Span {
        Span::new(self.start + offset, self.end + offset)
    }

    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end
    }
}

/// A remembered spreadsheet. Identity is `id`; `name` and `last_used` are
/// refreshed on every use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    pub id: String,
    pub name: String,
    pub last_used: i64,
}

/// One (label, value) row read from a spreadsheet tab. Constructed fresh on
/// every extraction call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub label: String,
    pub raw_value: String,
    pub display_value: String,
    /// Character range of the scientific-notation exponent within
    /// `display_value`, when present.
    pub exponent: Option<Span>,
    /// Coordinates of the value cell (1-based), used to link back to it.
    pub cell_row: u32,
    pub cell_col: u32,
    pub spreadsheet_id: String,
    pub sheet_gid: String,
}

/// Declarative description of one rich-text insertion: the text to insert and
/// the span-local range that must additionally be superscripted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionSpan {
    pub text: String,
    pub superscript: Option<Span>,
}

/// Opaque identifier of a text element within the document host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// The live insertion point: a text element and a character offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub element: ElementId,
    pub offset: usize,
}
