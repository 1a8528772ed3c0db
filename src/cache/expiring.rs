//! Namespaced, versioned, TTL-bounded cache over a [`KeyValueStore`].
//!
//! The cache is best-effort. Reads that fail for any reason are misses,
//! and writes that cannot be stored are dropped after one clear-and-retry.

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::entry::{physical_key, CacheEntry};
use super::store::{KeyValueStore, StoreError};
use super::validation::{validate_record, ValidationResult};
use crate::clock::Clock;

/// Default physical key prefix.
pub const DEFAULT_PREFIX: &str = "ballet_data_";

/// Default data shape version. Bump it to invalidate every stored entry.
pub const DEFAULT_VERSION: &str = "1.0";

/// Default entry lifetime in days.
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// Namespace and lifetime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub prefix: String,
    pub version: String,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            version: DEFAULT_VERSION.to_string(),
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }
}

/// What happened to a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Stored on the first attempt.
    Stored,
    /// The store was full; the namespace was cleared and the retry succeeded.
    StoredAfterClear,
    /// The write was dropped.
    Dropped,
}

/// Summary of the entries under the cache prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub fresh: usize,
    pub expired: usize,
    pub corrupt: usize,
    /// Bytes of keys and values under the prefix.
    pub total_bytes: u64,
}

impl CacheStats {
    /// Total number of entries.
    pub fn total(&self) -> usize {
        self.fresh + self.expired + self.corrupt
    }
}

/// State of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    Fresh,
    Expired,
    Corrupt,
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Expired => write!(f, "expired"),
            Self::Corrupt => write!(f, "corrupt"),
        }
    }
}

/// One entry under the cache prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Physical store key.
    pub key: String,
    pub state: EntryState,
    /// Time left before expiry; zero unless fresh.
    pub remaining: Duration,
    /// Bytes of key and value.
    pub size_bytes: u64,
}

/// Expiring key-value cache.
pub struct ExpiringCache {
    store: Box<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    settings: CacheSettings,
}

impl ExpiringCache {
    /// Create a cache over `store`.
    pub fn new(store: Box<dyn KeyValueStore>, clock: Arc<dyn Clock>, settings: CacheSettings) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// The backing store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// The backing store, mutably. Writes here bypass the cache namespace.
    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }

    /// Physical store key for a logical key.
    pub fn physical_key(&self, logical_key: &str) -> String {
        physical_key(&self.settings.prefix, logical_key, &self.settings.version)
    }

    /// Read a fresh payload.
    ///
    /// Expired and corrupt entries are evicted and reported as absent.
    pub fn get(&mut self, logical_key: &str) -> Option<Value> {
        let key = self.physical_key(logical_key);

        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Error reading cached data for {}: {}", logical_key, e);
                self.evict(&key);
                return None;
            }
        };

        match validate_record(&raw, self.clock.now_millis(), self.settings.ttl) {
            ValidationResult::Fresh(entry) => {
                debug!("Using cached data for {}", logical_key);
                Some(entry.data)
            }
            ValidationResult::Expired => {
                debug!("Cache expired for {}", logical_key);
                self.evict(&key);
                None
            }
            ValidationResult::Corrupt(reason) => {
                warn!("Error parsing cached data for {}: {}", logical_key, reason);
                self.evict(&key);
                None
            }
        }
    }

    /// Read a fresh payload and decode it.
    ///
    /// A payload that does not match `T` is treated as corrupt.
    pub fn get_as<T: DeserializeOwned>(&mut self, logical_key: &str) -> Option<T> {
        let value = self.get(logical_key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Cached data for {} has an unexpected shape: {}", logical_key, e);
                let key = self.physical_key(logical_key);
                self.evict(&key);
                None
            }
        }
    }

    /// Store a payload stamped with the current time.
    ///
    /// When the store is full, every entry under the prefix is cleared and
    /// the write is retried once. Failures are logged, never returned.
    pub fn set<T: Serialize + ?Sized>(&mut self, logical_key: &str, payload: &T) -> WriteOutcome {
        let data = match serde_json::to_value(payload) {
            Ok(data) => data,
            Err(e) => {
                warn!("Error caching data for {}: {}", logical_key, e);
                return WriteOutcome::Dropped;
            }
        };

        let entry = CacheEntry::new(data, self.clock.now_millis());
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Error caching data for {}: {}", logical_key, e);
                return WriteOutcome::Dropped;
            }
        };

        let key = self.physical_key(logical_key);
        match self.store.set(&key, &raw) {
            Ok(()) => {
                debug!("Data cached for {}", logical_key);
                WriteOutcome::Stored
            }
            Err(StoreError::CapacityExceeded { .. }) => {
                warn!("Cache full while storing {}, clearing cache", logical_key);
                self.clear();
                match self.store.set(&key, &raw) {
                    Ok(()) => WriteOutcome::StoredAfterClear,
                    Err(e) => {
                        warn!("Still unable to cache data after clearing: {}", e);
                        WriteOutcome::Dropped
                    }
                }
            }
            Err(e) => {
                warn!("Error caching data for {}: {}", logical_key, e);
                WriteOutcome::Dropped
            }
        }
    }

    /// Remove every entry under the prefix, plus any records the store can
    /// no longer read. Other keys are untouched.
    pub fn clear(&mut self) -> usize {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Unable to list cache keys: {}", e);
                return 0;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| k.starts_with(&self.settings.prefix)) {
            if matches!(self.store.remove(key), Ok(true)) {
                removed += 1;
            }
        }

        match self.store.purge_unreadable() {
            Ok(purged) => removed += purged,
            Err(e) => warn!("Unable to purge unreadable cache records: {}", e),
        }

        debug!("Cache cleared ({} entries)", removed);
        removed
    }

    /// Describe every entry under the prefix, without evicting anything.
    pub fn entries(&self) -> Vec<EntryInfo> {
        let now = self.clock.now_millis();
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Unable to list cache keys: {}", e);
                return Vec::new();
            }
        };

        keys.into_iter()
            .filter(|k| k.starts_with(&self.settings.prefix))
            .map(|key| {
                let raw = match self.store.get(&key) {
                    Ok(Some(raw)) => raw,
                    Ok(None) | Err(_) => {
                        return EntryInfo {
                            key,
                            state: EntryState::Corrupt,
                            remaining: Duration::zero(),
                            size_bytes: 0,
                        }
                    }
                };

                let size_bytes = (key.len() + raw.len()) as u64;
                let (state, remaining) = match validate_record(&raw, now, self.settings.ttl) {
                    ValidationResult::Fresh(entry) => (
                        EntryState::Fresh,
                        entry.remaining_ttl(now, self.settings.ttl),
                    ),
                    ValidationResult::Expired => (EntryState::Expired, Duration::zero()),
                    ValidationResult::Corrupt(_) => (EntryState::Corrupt, Duration::zero()),
                };

                EntryInfo {
                    key,
                    state,
                    remaining,
                    size_bytes,
                }
            })
            .collect()
    }

    /// Count entries under the prefix by state, without evicting anything.
    pub fn stats(&self) -> CacheStats {
        self.entries()
            .iter()
            .fold(CacheStats::default(), |mut stats, entry| {
                stats.total_bytes += entry.size_bytes;
                match entry.state {
                    EntryState::Fresh => stats.fresh += 1,
                    EntryState::Expired => stats.expired += 1,
                    EntryState::Corrupt => stats.corrupt += 1,
                }
                stats
            })
    }

    fn evict(&mut self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!("Unable to evict {}: {}", key, e);
        }
    }
}
