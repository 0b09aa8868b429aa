//! In-memory rich-text document. Serves as the production [`DocumentHost`]
//! for the CLI and as the document double in tests: text elements with
//! layered style spans, queryable as flat runs.

use crate::errors::{Result, SheetLinkError};
use crate::host::DocumentHost;
use crate::model::{Cursor, ElementId, Span};
use parking_lot::RwLock;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
enum RunStyle {
    Link(String),
    Superscript,
}

#[derive(Debug, Clone)]
struct StyledSpan {
    range: Span,
    style: RunStyle,
}

#[derive(Debug, Default)]
struct Element {
    text: String,
    styles: Vec<StyledSpan>,
}

/// A maximal stretch of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub link: Option<String>,
    pub superscript: bool,
}

pub struct TextBuffer {
    elements: RwLock<Vec<Element>>,
    cursor: RwLock<Option<Cursor>>,
}

impl TextBuffer {
    /// One empty paragraph, no cursor.
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// One paragraph holding `text`, no cursor.
    pub fn with_text(text: &str) -> Self {
        Self {
            elements: RwLock::new(vec![Element {
                text: text.to_string(),
                styles: Vec::new(),
            }]),
            cursor: RwLock::new(None),
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.read().len()
    }

    /// Places the cursor; the offset is a character offset and must lie
    /// within the element's text.
    pub fn set_cursor(&self, element: ElementId, offset: usize) -> Result<()> {
        let elements = self.elements.read();
        let target = lookup(&elements, element)?;
        if offset > char_len(&target.text) {
            return Err(SheetLinkError::InvalidInput(format!(
                "cursor offset {offset} outside element text"
            )));
        }
        *self.cursor.write() = Some(Cursor { element, offset });
        Ok(())
    }

    pub fn clear_cursor(&self) {
        *self.cursor.write() = None;
    }

    pub fn text(&self, element: ElementId) -> Result<String> {
        let elements = self.elements.read();
        Ok(lookup(&elements, element)?.text.clone())
    }

    /// The element's text split into maximal uniformly-styled runs.
    pub fn runs(&self, element: ElementId) -> Result<Vec<TextRun>> {
        let elements = self.elements.read();
        let target = lookup(&elements, element)?;
        let len = char_len(&target.text);
        if len == 0 {
            return Ok(Vec::new());
        }

        let mut boundaries = vec![0, len];
        for span in &target.styles {
            boundaries.push(span.range.start.min(len));
            boundaries.push(span.range.end.min(len));
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut runs = Vec::new();
        for pair in boundaries.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let segment = Span::new(start, end);
            let link = target.styles.iter().find_map(|span| match &span.style {
                RunStyle::Link(url) if covers(span.range, segment) => Some(url.clone()),
                _ => None,
            });
            let superscript = target
                .styles
                .iter()
                .any(|span| span.style == RunStyle::Superscript && covers(span.range, segment));
            runs.push(TextRun {
                text: slice_chars(&target.text, start, end),
                link,
                superscript,
            });
        }
        Ok(runs)
    }

    fn apply_style(&self, element: ElementId, range: Span, style: RunStyle) -> Result<()> {
        let mut elements = self.elements.write();
        let target = lookup_mut(&mut elements, element)?;
        if range.start > range.end || range.end > char_len(&target.text) {
            return Err(SheetLinkError::InvalidInput(format!(
                "style range {}..{} outside element text",
                range.start, range.end
            )));
        }
        target.styles.push(StyledSpan { range, style });
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHost for TextBuffer {
    fn cursor(&self) -> Result<Option<Cursor>> {
        Ok(*self.cursor.read())
    }

    fn insert_text(&self, at: Cursor, text: &str) -> Result<()> {
        let mut elements = self.elements.write();
        let target = lookup_mut(&mut elements, at.element)?;
        let byte_idx = byte_offset(&target.text, at.offset).ok_or_else(|| {
            SheetLinkError::InvalidInput(format!("insert offset {} outside element text", at.offset))
        })?;
        target.text.insert_str(byte_idx, text);

        // Inline insertion shifts style spans at or after the offset; a span
        // straddling the offset grows. Text appended exactly at a span's end
        // does not extend it.
        let inserted = char_len(text);
        for span in &mut target.styles {
            if span.range.start >= at.offset {
                span.range = span.range.shifted(inserted);
            } else if span.range.end > at.offset {
                span.range.end += inserted;
            }
        }
        Ok(())
    }

    fn apply_link(&self, element: ElementId, range: Span, url: &str) -> Result<()> {
        self.apply_style(element, range, RunStyle::Link(url.to_string()))
    }

    fn apply_superscript(&self, element: ElementId, range: Span) -> Result<()> {
        self.apply_style(element, range, RunStyle::Superscript)
    }
}

fn lookup(elements: &[Element], id: ElementId) -> Result<&Element> {
    elements
        .get(id.0 as usize)
        .ok_or_else(|| SheetLinkError::InvalidInput(format!("no element {}", id.0)))
}

fn lookup_mut(elements: &mut [Element], id: ElementId) -> Result<&mut Element> {
    elements
        .get_mut(id.0 as usize)
        .ok_or_else(|| SheetLinkError::InvalidInput(format!("no element {}", id.0)))
}

fn covers(outer: Span, inner: Span) -> bool {
    outer.start <= inner.start && outer.end >= inner.end
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn byte_offset(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset > char_len(text) {
        return None;
    }
    Some(
        text.char_indices()
            .nth(char_offset)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len()),
    )
}

fn slice_chars(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}
