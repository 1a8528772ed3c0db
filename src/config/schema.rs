//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format. Every field has a default, so an empty file
//! (or no file at all) yields a working configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::cache::{parse_ttl, CacheSettings, DEFAULT_PREFIX, DEFAULT_QUOTA_BYTES, DEFAULT_VERSION};
use crate::error::{BalletError, Result};
use crate::schedule::{ClassifierSettings, DEFAULT_HORIZON_DAYS};

/// Default API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Root configuration structure for `.ballets/config.yml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the ballet API
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Response cache settings
    pub cache: CacheConfig,

    /// Days ahead in which an unopened run still counts as current
    pub horizon_days: u32,

    /// Images used when the API omits them
    pub placeholders: Placeholders,

    /// Per-company display settings
    #[serde(default)]
    pub companies: BTreeMap<String, CompanySettings>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let mut companies = BTreeMap::new();
        companies.insert(
            "boston".to_string(),
            CompanySettings {
                show_past_performances: false,
                ..Default::default()
            },
        );
        companies.insert(
            "nbc".to_string(),
            CompanySettings {
                include_in_listings: false,
                ..Default::default()
            },
        );

        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            cache: CacheConfig::default(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            placeholders: Placeholders::default(),
            companies,
        }
    }
}

impl ServiceConfig {
    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings for the expiring cache.
    pub fn cache_settings(&self) -> Result<CacheSettings> {
        let ttl = parse_ttl(&self.cache.ttl).map_err(|e| BalletError::ConfigValidationError {
            message: format!("cache.ttl '{}': {}", self.cache.ttl, e),
        })?;

        Ok(CacheSettings {
            prefix: self.cache.prefix.clone(),
            version: self.cache.version.clone(),
            ttl,
        })
    }

    /// Settings for the schedule classifier.
    pub fn classifier_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            horizon_days: self.horizon_days,
        }
    }

    /// Display settings for a company, defaulted when not configured.
    pub fn company(&self, company_id: &str) -> CompanySettings {
        self.companies.get(company_id).cloned().unwrap_or_default()
    }
}

/// Response cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Prefix of every cache key
    pub prefix: String,

    /// Data shape version; changing it invalidates all entries
    pub version: String,

    /// Entry lifetime, e.g. "30d", "12h"
    pub ttl: String,

    /// Byte quota of the on-disk store
    pub quota_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            version: DEFAULT_VERSION.to_string(),
            ttl: "30d".to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

/// Placeholder images for performances without artwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    /// Banner-size placeholder
    pub image: String,

    /// Card-size placeholder
    pub thumbnail: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            image: "https://placehold.co/800x400?text=No+Image".to_string(),
            thumbnail: "https://placehold.co/400x200?text=No+Image".to_string(),
        }
    }
}

/// Display settings for one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySettings {
    /// Show the past performances section on the company schedule
    pub show_past_performances: bool,

    /// Include this company's fallback performances in aggregate listings
    pub include_in_listings: bool,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            show_past_performances: true,
            include_in_listings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: ServiceConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.horizon_days, 30);
    }

    #[test]
    fn default_company_flags() {
        let config = ServiceConfig::default();
        assert!(!config.company("boston").show_past_performances);
        assert!(!config.company("nbc").include_in_listings);
        assert!(config.company("royal_ballet").show_past_performances);
        assert!(config.company("royal_ballet").include_in_listings);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: ServiceConfig = serde_yaml::from_str(
            r#"
api_base_url: "http://ballets.example/api"
cache:
  ttl: 12h
companies:
  royal_ballet:
    show_past_performances: false
"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://ballets.example/api");
        assert_eq!(config.cache.prefix, DEFAULT_PREFIX);
        assert_eq!(config.cache_settings().unwrap().ttl, chrono::Duration::hours(12));
        assert!(!config.company("royal_ballet").show_past_performances);
        assert!(config.company("royal_ballet").include_in_listings);
    }

    #[test]
    fn default_cache_settings() {
        let settings = ServiceConfig::default().cache_settings().unwrap();
        assert_eq!(settings, CacheSettings::default());
    }

    #[test]
    fn bad_ttl_is_a_validation_error() {
        let mut config = ServiceConfig::default();
        config.cache.ttl = "a while".to_string();
        assert!(matches!(
            config.cache_settings(),
            Err(BalletError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn classifier_settings_follow_horizon() {
        let config = ServiceConfig {
            horizon_days: 14,
            ..Default::default()
        };
        assert_eq!(config.classifier_settings().horizon_days, 14);
    }
}
