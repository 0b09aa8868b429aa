use crate::document::TextBuffer;
use crate::model::ElementId;
use crate::session::SheetLinkSession;
use anyhow::{Result, anyhow};
use serde_json::{Value, json};

const BODY: ElementId = ElementId(0);

pub fn insert(
    session: &SheetLinkSession,
    document: &TextBuffer,
    sheet: &str,
    tab: &str,
    label: &str,
    offset: usize,
) -> Result<Value> {
    let entries = session.fields(sheet, tab)?;
    let entry = entries
        .into_iter()
        .find(|entry| entry.label == label)
        .ok_or_else(|| anyhow!("no field labeled '{label}' in tab '{tab}'"))?;

    document.set_cursor(BODY, offset)?;
    session.insert_field(&entry)?;

    Ok(json!({
        "text": document.text(BODY)?,
        "runs": document.runs(BODY)?,
    }))
}
