//! Upstream payload shapes and their normalization into [`Performance`].

use serde::Deserialize;

use crate::config::Placeholders;
use crate::model::{CalendarDate, Performance};

/// Title used when the API omits one.
pub const UNTITLED: &str = "Untitled Performance";

/// Description used when the API omits one.
pub const NO_DESCRIPTION: &str = "No description available";

/// A performance as the API returns it. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPerformance {
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub venue: Option<String>,
    pub video_url: Option<String>,
    pub company: Option<String>,
    pub company_name: Option<String>,
}

/// A list of performances, either bare or wrapped in `{"data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PerformanceListing {
    Wrapped { data: Vec<RawPerformance> },
    Bare(Vec<RawPerformance>),
}

impl PerformanceListing {
    /// The performances, whichever shape they arrived in.
    pub fn into_items(self) -> Vec<RawPerformance> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Treat empty strings like missing values.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RawPerformance {
    /// Fill defaults and parse dates.
    ///
    /// `company_id` is used when the payload does not name its company.
    pub fn normalize(self, company_id: Option<&str>, placeholders: &Placeholders) -> Performance {
        let image = present(self.image);
        let thumbnail = present(self.thumbnail)
            .or_else(|| image.clone())
            .unwrap_or_else(|| placeholders.thumbnail.clone());

        Performance {
            id: present(self.id)
                .or(present(self.object_id))
                .or(present(self.url))
                .unwrap_or_default(),
            title: present(self.title).unwrap_or_else(|| UNTITLED.to_string()),
            description: present(self.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image_url: image.unwrap_or_else(|| placeholders.image.clone()),
            thumbnail_url: thumbnail,
            start_date: self
                .start_date
                .map(|s| CalendarDate::parse(&s))
                .unwrap_or_default(),
            end_date: self
                .end_date
                .map(|s| CalendarDate::parse(&s))
                .unwrap_or_default(),
            venue: self.venue.unwrap_or_default(),
            video_url: present(self.video_url),
            company: present(self.company).or_else(|| company_id.map(str::to_string)),
            company_name: present(self.company_name),
            is_past: false,
            is_current: false,
            is_next: false,
        }
    }
}

/// Normalize a whole listing.
pub fn normalize_listing(
    listing: PerformanceListing,
    company_id: Option<&str>,
    placeholders: &Placeholders,
) -> Vec<Performance> {
    listing
        .into_items()
        .into_iter()
        .map(|raw| raw.normalize(company_id, placeholders))
        .collect()
}
