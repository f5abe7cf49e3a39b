//! Local key-value persistence
//!
//! Bookmarks and groups persist to a host-provided string store
//! (localStorage in browsers), namespaced per widget instance by a
//! configurable key. An in-memory implementation ships for tests and
//! headless use.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage quota exceeded for key '{key}'")]
    QuotaExceeded { key: String },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The host's string-keyed persistence surface.
pub trait KeyValueStore {
    /// Read the stored value for a key, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store a value under a key, replacing any prior value.
    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key.
    fn remove_item(&mut self, key: &str);
}

/// In-memory store for tests and headless operation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}
