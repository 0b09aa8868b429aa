use crate::errors::SheetLinkError;
use crate::session::SheetLinkSession;
use anyhow::Result;
use serde_json::{Value, json};

pub fn tabs(session: &SheetLinkSession, sheet: &str) -> Result<Value> {
    Ok(json!({ "tabs": session.tabs(sheet)? }))
}

pub fn fields(session: &SheetLinkSession, sheet: &str, tab: &str) -> Result<Value> {
    // A tab without labeled rows reads as an empty list here; only unknown
    // spreadsheets or tabs are hard errors.
    match session.fields(sheet, tab) {
        Ok(fields) => Ok(json!({ "fields": fields })),
        Err(SheetLinkError::EmptyTab(_)) => Ok(json!({ "fields": [] })),
        Err(err) => Err(err.into()),
    }
}
