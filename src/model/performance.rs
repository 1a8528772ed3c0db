//! Performance records.

use serde::{Deserialize, Serialize};

use super::date::{format_date_range, CalendarDate};

/// A single production in a company's season.
///
/// The `is_*` flags are derived by [`crate::schedule::annotate`] and are
/// only meaningful relative to the date they were computed for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Performance {
    /// Identifier, unique within a company.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Full-size banner image.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Card-size image.
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    pub start_date: CalendarDate,
    pub end_date: CalendarDate,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Owning company id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Display name of the owning company, present in aggregate listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub is_past: bool,
    pub is_current: bool,
    pub is_next: bool,
}

impl Performance {
    /// Create a performance with the given id, title and run.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<CalendarDate>,
        end_date: impl Into<CalendarDate>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Default::default()
        }
    }

    /// Set the owning company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Human-readable date range, empty when a date is invalid.
    pub fn date_range(&self) -> String {
        format_date_range(&self.start_date, &self.end_date)
    }

    /// Whether the title or description contains `query`, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Whether this performance belongs to `company_id`.
    pub fn belongs_to(&self, company_id: &str) -> bool {
        self.company.as_deref() == Some(company_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn deserializes_listing_shape() {
        let json = r#"{
            "id": "pob_giselle",
            "title": "Giselle",
            "description": "A romantic ballet",
            "image": "https://placehold.co/800x400?text=Giselle",
            "thumbnail": "https://placehold.co/400x200?text=Giselle",
            "startDate": "2025-06-01",
            "endDate": "2025-06-15",
            "venue": "Palais Garnier",
            "videoUrl": "",
            "company": "paris_opera_ballet",
            "isCurrent": true
        }"#;

        let perf: Performance = serde_json::from_str(json).unwrap();
        assert_eq!(perf.id, "pob_giselle");
        assert_eq!(perf.image_url, "https://placehold.co/800x400?text=Giselle");
        assert_eq!(
            perf.start_date.date(),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert!(perf.is_current);
        assert!(!perf.is_next);
        assert!(perf.belongs_to("paris_opera_ballet"));
    }

    #[test]
    fn missing_fields_default() {
        let perf: Performance = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(perf.title, "");
        assert!(!perf.start_date.is_valid());
        assert!(perf.company.is_none());
    }

    #[test]
    fn matches_title_and_description_case_insensitively() {
        let mut perf = Performance::new("a", "Swan Lake", CalendarDate::default(), CalendarDate::default());
        perf.description = "Prince Siegfried meets Odette".to_string();

        assert!(perf.matches("swan"));
        assert!(perf.matches("ODETTE"));
        assert!(!perf.matches("giselle"));
    }

    #[test]
    fn date_range_uses_long_month_names() {
        let perf = Performance::new(
            "a",
            "Giselle",
            CalendarDate::parse("2025-06-01"),
            CalendarDate::parse("2025-06-15"),
        );
        assert_eq!(perf.date_range(), "June 1, 2025 - June 15, 2025");
    }
}
