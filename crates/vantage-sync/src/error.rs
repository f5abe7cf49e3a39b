//! Error types for vantage-sync
//!
//! Transport and persistence failures are non-fatal by design: sync
//! degrades to local-only operation and the failure is surfaced through
//! the manager's error callback.

use thiserror::Error;
use vantage_core::{TableError, TransportError};

/// Main error type for sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Broadcast transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Document table failure
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Optimistic version check failed on the persisted channel row
    #[error("Persist conflict on channel '{channel}': expected version {expected}, found {actual}")]
    PersistConflict {
        channel: String,
        expected: i64,
        actual: i64,
    },

    /// Property not registered with this manager
    #[error("Unknown property: {name}")]
    UnknownProperty { name: String },

    /// Persisted channel row did not parse
    #[error("Malformed persisted state: {message}")]
    MalformedState { message: String },
}

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
