//! User-facing error taxonomy.
//!
//! `NotFound` and `InvalidInput` are recoverable: the menu prints them and
//! keeps running. Storage errors end the process.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum TrackerError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Failed to open database: {}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl TrackerError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether the menu loop can report this error and carry on.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidInput { .. })
    }
}

pub(crate) type Result<T> = std::result::Result<T, TrackerError>;
