//! Backing stores for the cache.
//!
//! A [`KeyValueStore`] is a flat, string-keyed, string-valued namespace
//! with a byte quota, shared with keys the cache does not own.

use std::collections::BTreeMap;
use thiserror::Error;

/// Default quota for a store, matching common browser storage limits.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Errors raised by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would push the store over its quota.
    #[error("store quota of {quota} bytes exceeded writing '{key}'")]
    CapacityExceeded { key: String, quota: u64 },

    /// Underlying IO failure.
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record on disk could not be decoded.
    #[error("corrupt store record: {0}")]
    Corrupt(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A persistent string-keyed namespace.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a value. Returns whether it existed.
    fn remove(&mut self, key: &str) -> StoreResult<bool>;

    /// All keys currently stored.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Delete records that can no longer be read back, so they stop
    /// counting against the quota. Returns how many were deleted.
    fn purge_unreadable(&mut self) -> StoreResult<usize> {
        Ok(0)
    }
}

/// In-memory store with an optional quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<u64>,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that holds at most `quota` bytes of keys and values.
    pub fn with_quota(quota: u64) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    /// Bytes used by keys and values.
    pub fn used_bytes(&self) -> u64 {
        self.entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map(|old| (key.len() + old.len()) as u64)
                .unwrap_or(0);
            let needed = self.used_bytes() - replaced + (key.len() + value.len()) as u64;
            if needed > quota {
                return Err(StoreError::CapacityExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
