//! World Ballets - ballet company profiles and performance schedules.
//!
//! Company and performance data comes from a REST API, is cached in a
//! persistent expiring store, and falls back to a catalog embedded in the
//! binary when the API cannot be reached. Performances are classified as
//! past, current or next relative to a reference date.
//!
//! # Modules
//!
//! - [`api`] - HTTP client and payload normalization
//! - [`cache`] - Namespaced, versioned, TTL-bounded response cache
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Injectable time source
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`fallback`] - Embedded offline catalog
//! - [`model`] - Companies, performances and calendar dates
//! - [`schedule`] - Past / current / next classification
//! - [`service`] - Cache-first data access with fallback
//! - [`ui`] - Terminal output and prompts
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use world_ballets::model::Performance;
//! use world_ballets::schedule::{is_current, is_past, ClassifierSettings};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let giselle = Performance::new(
//!     "pob_giselle",
//!     "Giselle",
//!     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
//! );
//!
//! assert!(is_current(&giselle, today, &ClassifierSettings::default()));
//! assert!(!is_past(&giselle, today));
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod schedule;
pub mod service;
pub mod ui;

pub use error::{BalletError, Result};
pub use service::DataService;
