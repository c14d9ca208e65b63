//! Error types for widget-board
//!
//! Malformed stored layouts and catalog misses are never errors: they are
//! recovered where they happen. What remains is store I/O and caller mistakes
//! such as adding a widget the catalog does not know.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Key-value store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Board editing error
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing the store file
    #[error("Failed to access store: {0}")]
    Io(#[source] std::io::Error),

    /// Store file exists but is not a JSON object
    #[error("Failed to parse store {path}: {message}")]
    Parse {
        /// Path to the store file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Failed to serialize a value for storage
    #[error("Failed to serialize store contents: {0}")]
    Serialize(String),

    /// Failed to replace the store file atomically
    #[error("Failed to write store atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path to the store file
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },
}

/// Board editing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Widget id has no catalog entry
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    /// Placement index past the end of the layout
    #[error("Placement index {index} out of range (layout has {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of placements
        len: usize,
    },
}

/// Result type alias for widget-board operations
pub type Result<T> = std::result::Result<T, Error>;
