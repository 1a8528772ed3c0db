//! Calendar dates as they appear in performance listings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A performance start or end date.
///
/// Upstream data is not always clean, so a string that does not parse is
/// kept verbatim as [`CalendarDate::Invalid`] instead of failing the whole
/// payload. Comparisons involving an invalid date yield `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CalendarDate {
    /// A parsed calendar date.
    Valid(NaiveDate),
    /// The raw text of a date that could not be parsed (possibly empty).
    Invalid(String),
}

impl CalendarDate {
    /// Parse a date string.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamps (the time part is dropped).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Self::Valid(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Valid(ts.date_naive());
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return Self::Valid(ts.date());
        }

        Self::Invalid(raw.to_string())
    }

    /// The parsed date, if valid.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Invalid(_) => None,
        }
    }

    /// Whether the date parsed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Compare against a reference date; `None` when this date is invalid.
    pub fn compare(&self, other: NaiveDate) -> Option<Ordering> {
        self.date().map(|date| date.cmp(&other))
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::Invalid(String::new())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::parse(&s)).unwrap_or_default())
    }
}

/// Format a run as `"June 1, 2025 - June 15, 2025"`.
///
/// Returns an empty string when either end is invalid.
pub fn format_date_range(start: &CalendarDate, end: &CalendarDate) -> String {
    match (start.date(), end.date()) {
        (Some(start), Some(end)) => format!(
            "{} - {}",
            start.format("%B %-d, %Y"),
            end.format("%B %-d, %Y")
        ),
        _ => String::new(),
    }
}
