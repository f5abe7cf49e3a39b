//! Error types for vantage-bookmarks

use thiserror::Error;
use vantage_core::StoreError;

/// Main error type for bookmark operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// Bookmark id not present in the manager
    #[error("Bookmark not found: {id}")]
    NotFound { id: String },

    /// Group id not present in the manager
    #[error("Group not found: {id}")]
    GroupNotFound { id: String },

    /// Generation config rejected before running
    #[error("Invalid generation config: {message}")]
    InvalidGeneration { message: String },

    /// Field missing from the source table
    #[error("Field '{field}' not found in table data")]
    FieldNotFound { field: String },

    /// Imported JSON did not parse or carried an unknown version
    #[error("Import failed: {message}")]
    ImportFailed { message: String },

    /// Local store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for bookmark operations.
pub type BookmarkResult<T> = Result<T, BookmarkError>;
