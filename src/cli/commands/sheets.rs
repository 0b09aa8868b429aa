use crate::session::SheetLinkSession;
use crate::workspace::XlsxWorkspace;
use anyhow::Result;
use serde_json::{Value, json};

pub fn list_sheets(workspace: &XlsxWorkspace) -> Result<Value> {
    let sheets = workspace.list()?;
    Ok(json!({ "sheets": sheets }))
}

pub fn recent(session: &SheetLinkSession) -> Result<Value> {
    Ok(json!({ "recent": session.recent_sheets() }))
}

pub fn recent_names(session: &SheetLinkSession) -> Result<Value> {
    Ok(json!({ "names": session.recent_sheet_names() }))
}

pub fn clear_recent(session: &SheetLinkSession) -> Result<Value> {
    session.clear_recent_sheets()?;
    Ok(json!({ "cleared": true }))
}

pub fn open(session: &SheetLinkSession, url: &str) -> Result<Value> {
    let sheet = session.open_sheet(url)?;
    Ok(json!({ "sheet": sheet }))
}
