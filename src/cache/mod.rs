//! Response caching.
//!
//! This module provides a persistent, namespaced cache for API responses
//! with version-tagged keys, TTL-based expiry, and clear-and-retry recovery
//! when the backing store runs out of room.

pub mod entry;
pub mod expiring;
pub mod file;
pub mod store;
pub mod validation;

pub use entry::{physical_key, CacheEntry};
pub use expiring::{
    CacheSettings, CacheStats, EntryInfo, EntryState, ExpiringCache, WriteOutcome,
    DEFAULT_PREFIX, DEFAULT_TTL_DAYS, DEFAULT_VERSION,
};
pub use file::FileStore;
pub use store::{KeyValueStore, MemoryStore, StoreError, StoreResult, DEFAULT_QUOTA_BYTES};
pub use validation::{format_duration, parse_ttl, validate_record, ValidationResult};

/// Get the default cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("world-ballets")
        .join("store")
}
