//! Cache record validation and TTL parsing.

use anyhow::Result;
use chrono::Duration;

use super::CacheEntry;

/// Outcome of checking a stored record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Record is fresh and decoded.
    Fresh(CacheEntry),
    /// Record is older than the TTL or has no timestamp.
    Expired,
    /// Record could not be decoded.
    Corrupt(String),
}

/// Decode a raw stored record and check its age against `ttl`.
pub fn validate_record(raw: &str, now_millis: i64, ttl: Duration) -> ValidationResult {
    match serde_json::from_str::<CacheEntry>(raw) {
        Ok(entry) if entry.is_expired(now_millis, ttl) => ValidationResult::Expired,
        Ok(entry) => ValidationResult::Fresh(entry),
        Err(e) => ValidationResult::Corrupt(e.to_string()),
    }
}

/// TTL units, largest first, as (suffix, seconds).
const UNITS: [(char, i64); 4] = [('d', 86_400), ('h', 3_600), ('m', 60), ('s', 1)];

/// Parse a TTL string like "30d", "24h", "30m". A bare number is seconds.
pub fn parse_ttl(ttl: &str) -> Result<Duration> {
    let ttl = ttl.trim().to_lowercase();
    let (digits, unit) = UNITS
        .iter()
        .find_map(|&(suffix, secs)| ttl.strip_suffix(suffix).map(|d| (d, secs)))
        .unwrap_or((ttl.as_str(), 1));

    let n: i64 = digits.trim().parse()?;
    n.checked_mul(unit)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| anyhow::anyhow!("'{}' is out of range", ttl))
}

/// Render a duration in its largest whole unit, e.g. "30d".
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();
    let (suffix, unit) = UNITS
        .iter()
        .copied()
        .find(|&(_, unit)| secs >= unit)
        .unwrap_or(('s', 1));

    format!("{}{}", secs / unit, suffix)
}
