//! Cache record and key types.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cached payload as written to the backing store.
///
/// Serialized as `{"data": ..., "timestamp": <epoch millis>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload.
    pub data: Value,
    /// When the payload was stored, in milliseconds since the Unix epoch.
    /// A record without a timestamp is never fresh.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl CacheEntry {
    /// Create an entry stored at `now_millis`.
    pub fn new(data: Value, now_millis: i64) -> Self {
        Self {
            data,
            timestamp: Some(now_millis),
        }
    }

    /// Age of the entry at `now_millis`.
    ///
    /// `None` when there is no timestamp or the age is out of range.
    pub fn age(&self, now_millis: i64) -> Option<Duration> {
        self.timestamp
            .and_then(|stored| now_millis.checked_sub(stored))
            .and_then(Duration::try_milliseconds)
    }

    /// An entry is fresh iff `now - timestamp < ttl`.
    pub fn is_expired(&self, now_millis: i64, ttl: Duration) -> bool {
        match self.age(now_millis) {
            Some(age) => age >= ttl,
            None => true,
        }
    }

    /// Time left before expiry, zero when already expired.
    pub fn remaining_ttl(&self, now_millis: i64, ttl: Duration) -> Duration {
        match self.age(now_millis) {
            Some(age) if age < ttl => ttl.checked_sub(&age).unwrap_or_else(Duration::zero),
            _ => Duration::zero(),
        }
    }
}

/// Compose the physical key: `<prefix><logical>_v<version>`.
pub fn physical_key(prefix: &str, logical_key: &str, version: &str) -> String {
    format!("{}{}_v{}", prefix, logical_key, version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_750_000_000_000;

    #[test]
    fn serialized_shape() {
        let entry = CacheEntry::new(json!({"id": "royal_ballet"}), NOW);
        let text = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            text,
            r#"{"data":{"id":"royal_ballet"},"timestamp":1750000000000}"#
        );
    }

    #[test]
    fn fresh_until_ttl_boundary() {
        let ttl = Duration::days(30);
        let entry = CacheEntry::new(json!(1), NOW);

        assert!(!entry.is_expired(NOW, ttl));
        assert!(!entry.is_expired(NOW + ttl.num_milliseconds() - 1, ttl));
        assert!(entry.is_expired(NOW + ttl.num_milliseconds(), ttl));
    }

    #[test]
    fn missing_timestamp_is_expired() {
        let entry: CacheEntry = serde_json::from_str(r#"{"data": [1, 2]}"#).unwrap();
        assert!(entry.timestamp.is_none());
        assert!(entry.is_expired(NOW, Duration::days(30)));
    }

    #[test]
    fn out_of_range_timestamp_is_expired() {
        let entry = CacheEntry::new(json!(1), i64::MIN);
        assert_eq!(entry.age(NOW), None);
        assert!(entry.is_expired(NOW, Duration::days(30)));
        assert_eq!(entry.remaining_ttl(NOW, Duration::days(30)), Duration::zero());
    }

    #[test]
    fn remaining_ttl() {
        let ttl = Duration::hours(1);
        let entry = CacheEntry::new(json!(null), NOW);

        assert_eq!(
            entry.remaining_ttl(NOW + Duration::minutes(15).num_milliseconds(), ttl),
            Duration::minutes(45)
        );
        assert_eq!(
            entry.remaining_ttl(NOW + Duration::hours(2).num_milliseconds(), ttl),
            Duration::zero()
        );
    }

    #[test]
    fn physical_key_format() {
        assert_eq!(
            physical_key("ballet_data_", "company_bolshoi_ballet", "1.0"),
            "ballet_data_company_bolshoi_ballet_v1.0"
        );
    }
}
