//! Directory-backed key-value store.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::store::{KeyValueStore, StoreError, StoreResult, DEFAULT_QUOTA_BYTES};

/// One record file on disk.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    value: String,
}

/// Key-value store keeping one JSON record file per key.
///
/// File names are derived from a hash of the key, so arbitrary keys are
/// safe. The quota bounds the total size of all record files.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Root directory for records.
    root: PathBuf,
    quota: u64,
}

impl FileStore {
    /// Create a store rooted at `root` with the default quota.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_quota(root, DEFAULT_QUOTA_BYTES)
    }

    /// Create a store with an explicit quota in bytes.
    pub fn with_quota(root: impl Into<PathBuf>, quota: u64) -> Self {
        Self {
            root: root.into(),
            quota,
        }
    }

    /// Get the store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured quota in bytes.
    pub fn quota(&self) -> u64 {
        self.quota
    }

    /// Ensure the store directory exists.
    fn ensure_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Path of the record file for a key.
    pub fn record_path(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.root.join(hash_str).with_extension("json")
    }

    fn record_files(&self) -> StoreResult<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Total size of all record files in bytes.
    pub fn total_size(&self) -> StoreResult<u64> {
        let mut total = 0;
        for path in self.record_files()? {
            total += fs::metadata(&path)?.len();
        }
        Ok(total)
    }

    fn read_record(path: &Path) -> StoreResult<Record> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let record = Self::read_record(&path)?;
        if record.key != key {
            return Ok(None);
        }
        Ok(Some(record.value))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.ensure_dir()?;

        let path = self.record_path(key);
        let json = serde_json::to_string(&Record {
            key: key.to_string(),
            value: value.to_string(),
        })
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let replaced = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        let used = self.total_size()?.saturating_sub(replaced);
        if used + json.len() as u64 > self.quota {
            return Err(StoreError::CapacityExceeded {
                key: key.to_string(),
                quota: self.quota,
            });
        }

        fs::write(&path, json)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for path in self.record_files()? {
            match Self::read_record(&path) {
                Ok(record) => keys.push(record.key),
                Err(e) => tracing::debug!("Skipping unreadable record: {}", e),
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn purge_unreadable(&mut self) -> StoreResult<usize> {
        let mut purged = 0;
        for path in self.record_files()? {
            if let Err(e) = Self::read_record(&path) {
                tracing::debug!("Deleting unreadable record: {}", e);
                fs::remove_file(&path)?;
                purged += 1;
            }
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_creation() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        assert_eq!(store.root(), temp.path());
        assert_eq!(store.quota(), DEFAULT_QUOTA_BYTES);
    }

    #[test]
    fn set_and_get() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set("ballet_data_company_x_v1.0", "{\"a\":1}").unwrap();

        assert_eq!(
            store.get("ballet_data_company_x_v1.0").unwrap(),
            Some("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn get_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("not-created-yet"));

        assert_eq!(store.get("nothing").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn remove_entry() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());

        store.set("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn keys_survive_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let mut store = FileStore::new(temp.path());
            store.set("b", "2").unwrap();
            store.set("a", "1").unwrap();
        }

        let store = FileStore::new(temp.path());
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn corrupt_record_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        fs::write(store.record_path("k"), "not json").unwrap();

        assert!(matches!(store.get("k"), Err(StoreError::Corrupt(_))));
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn purge_deletes_only_unreadable_records() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        store.set("kept", "1").unwrap();
        fs::write(temp.path().join("deadbeef.json"), "garbage").unwrap();

        assert_eq!(store.purge_unreadable().unwrap(), 1);
        assert!(!temp.path().join("deadbeef.json").exists());
        assert_eq!(store.get("kept").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn quota_is_enforced() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::with_quota(temp.path(), 64);

        store.set("k", "small").unwrap();
        let err = store.set("big", &"x".repeat(100)).unwrap_err();

        assert!(matches!(err, StoreError::CapacityExceeded { .. }));
        assert_eq!(store.get("big").unwrap(), None);
    }

    #[test]
    fn record_path_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        assert_eq!(store.record_path("a"), store.record_path("a"));
        assert_ne!(store.record_path("a"), store.record_path("b"));
    }
}
