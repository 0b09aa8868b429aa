//! Production host implementations over the local filesystem: an xlsx-backed
//! spreadsheet host scanning a workspace directory, and a JSON-file property
//! store.

pub mod store;
pub mod xlsx;

pub use store::JsonFileStore;
pub use xlsx::{WorkbookListing, XlsxWorkspace};
