//! Configuration validation rules.
//!
//! - `api_base_url` must be an absolute http(s) URL
//! - `cache.ttl` must parse and be positive
//! - `cache.prefix` and `cache.version` must be non-empty
//! - `request_timeout_secs` must be positive
//! - `horizon_days` must not exceed [`MAX_HORIZON_DAYS`]

use reqwest::Url;

use crate::cache::parse_ttl;
use crate::config::schema::ServiceConfig;
use crate::error::{BalletError, Result};

/// Longest accepted lookahead horizon, ten years.
pub const MAX_HORIZON_DAYS: u32 = 3650;

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Configuration key the error refers to
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &ServiceConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match Url::parse(&config.api_base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "api_base_url",
            format!("api_base_url must use http or https, got '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "api_base_url",
            format!("api_base_url '{}' is not a URL: {}", config.api_base_url, e),
        )),
    }

    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "request_timeout_secs",
            "request_timeout_secs must be greater than zero",
        ));
    }

    match parse_ttl(&config.cache.ttl) {
        Ok(ttl) if ttl > chrono::Duration::zero() => {}
        Ok(_) => errors.push(ValidationError::new(
            "cache.ttl",
            "cache.ttl must be greater than zero",
        )),
        Err(e) => errors.push(ValidationError::new(
            "cache.ttl",
            format!("cache.ttl '{}' is invalid: {}", config.cache.ttl, e),
        )),
    }

    if config.horizon_days > MAX_HORIZON_DAYS {
        errors.push(ValidationError::new(
            "horizon_days",
            format!(
                "horizon_days must be at most {}, got {}",
                MAX_HORIZON_DAYS, config.horizon_days
            ),
        ));
    }

    if config.cache.prefix.is_empty() {
        errors.push(ValidationError::new(
            "cache.prefix",
            "cache.prefix must not be empty",
        ));
    }

    if config.cache.version.is_empty() {
        errors.push(ValidationError::new(
            "cache.version",
            "cache.version must not be empty",
        ));
    }

    errors
}

/// Validate and return Result.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &ServiceConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BalletError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
