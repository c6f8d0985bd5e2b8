//! Errors raised while building or loading a content table.

use std::fmt;

/// Errors that can occur while building or loading [`Content`](crate::Content).
#[derive(Debug)]
pub enum ContentError {
    /// The content file could not be read.
    Io(std::io::Error),
    /// The document is not valid JSON for a content table.
    Parse(serde_json::Error),
    /// Two entries share an id.
    DuplicateId(String),
    /// A required text field is empty.
    EmptyField(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "I/O error: {e}"),
            ContentError::Parse(e) => write!(f, "invalid content document: {e}"),
            ContentError::DuplicateId(id) => write!(f, "duplicate entry id: {id}"),
            ContentError::EmptyField(what) => write!(f, "empty {what}"),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Io(e) => Some(e),
            ContentError::Parse(e) => Some(e),
            ContentError::DuplicateId(_) | ContentError::EmptyField(_) => None,
        }
    }
}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::Io(e)
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Parse(e)
    }
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
