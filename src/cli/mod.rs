pub mod commands;
pub mod output;

use crate::config::{CliArgs, SessionConfig};
use crate::document::TextBuffer;
use crate::session::SheetLinkSession;
use crate::workspace::{JsonFileStore, XlsxWorkspace};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "sheetlink-cli",
    version,
    about = "Extract spreadsheet fields and insert them as linked rich text"
)]
pub struct Cli {
    #[command(flatten)]
    pub config: CliArgs,

    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List workbooks under the workspace root
    ListSheets,
    /// List remembered spreadsheets, most recent first
    Recent,
    /// List display names of remembered spreadsheets
    RecentNames,
    /// Forget all remembered spreadsheets
    ClearRecent,
    /// Remember a spreadsheet by URL
    Open { url: String },
    /// List tabs of a spreadsheet
    Tabs { sheet: String },
    /// List labeled fields of one tab
    Fields { sheet: String, tab: String },
    /// Insert a field into a document buffer at the cursor and print the
    /// resulting styled runs
    Insert {
        sheet: String,
        tab: String,
        label: String,
        /// Existing document text to insert into
        #[arg(long, default_value = "")]
        text: String,
        /// Cursor position within the document text
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn run(config: SessionConfig, command: Commands) -> Result<Value> {
    config.ensure_workspace_root()?;
    let config = Arc::new(config);

    let workspace = Arc::new(XlsxWorkspace::new(
        &config.workspace_root,
        config.supported_extensions.clone(),
    ));
    let store = Arc::new(JsonFileStore::new(&config.store_path));
    let document = Arc::new(match &command {
        Commands::Insert { text, .. } => TextBuffer::with_text(text),
        _ => TextBuffer::new(),
    });
    let session = SheetLinkSession::new(
        config,
        workspace.clone(),
        workspace.clone(),
        store,
        document.clone(),
    );

    match command {
        Commands::ListSheets => commands::sheets::list_sheets(&workspace),
        Commands::Recent => commands::sheets::recent(&session),
        Commands::RecentNames => commands::sheets::recent_names(&session),
        Commands::ClearRecent => commands::sheets::clear_recent(&session),
        Commands::Open { url } => commands::sheets::open(&session, &url),
        Commands::Tabs { sheet } => commands::fields::tabs(&session, &sheet),
        Commands::Fields { sheet, tab } => commands::fields::fields(&session, &sheet, &tab),
        Commands::Insert {
            sheet,
            tab,
            label,
            offset,
            ..
        } => commands::insert::insert(&session, &document, &sheet, &tab, &label, offset),
    }
}
