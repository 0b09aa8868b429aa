//! Extracts labeled field values from spreadsheet tabs and inserts them into
//! a document at the cursor as rich text: the inserted value is hyperlinked
//! back to its source cell, and scientific-notation exponents are rendered as
//! superscript. A bounded recency cache remembers recently used spreadsheets.
//!
//! Host services (document, spreadsheet, key/value store, name resolution)
//! are abstracted behind the traits in [`host`]; [`workspace`] provides an
//! xlsx-backed implementation over a local directory and [`document`] an
//! in-memory rich-text buffer.

pub mod address;
pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod extract;
pub mod host;
pub mod insert;
pub mod model;
pub mod notation;
pub mod recent;
pub mod session;
pub mod url;
pub mod workspace;

pub use errors::{Result, SheetLinkError};
pub use session::SheetLinkSession;
