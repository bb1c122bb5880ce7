//! Capability errors on the background side.

use thiserror::Error;

/// Session storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The storage area cannot be reached.
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// A stored record does not have the expected shape.
    #[error("Malformed record '{key}': {reason}")]
    Malformed { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Context-menu registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(String),

    #[error("Context menus unavailable: {0}")]
    Unavailable(String),
}
