use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetLinkError>;

#[derive(Debug, Error)]
pub enum SheetLinkError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("tab '{0}' has no labeled rows")]
    EmptyTab(String),

    #[error("no active cursor in the document")]
    NoCursor,

    #[error("superscript range {start}..{end} outside inserted text of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("host call failed: {0}")]
    HostUnavailable(anyhow::Error),
}

impl SheetLinkError {
    pub fn host(err: impl Into<anyhow::Error>) -> Self {
        SheetLinkError::HostUnavailable(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SheetLinkError::NotFound(_))
    }
}
