//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use world_ballets::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".ballets");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "horizon_days: 14").unwrap();
//!
//! let config = load_config(temp.path(), Some(&dir.join("config.yml"))).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.horizon_days, 14);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_file, load_config_value, load_merged_config, parse_config,
    ConfigPaths, CONFIG_DIR, CONFIG_FILE,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    CacheConfig, CompanySettings, Placeholders, ServiceConfig, DEFAULT_API_BASE_URL,
};
pub use validator::{validate, validate_config, ValidationError, MAX_HORIZON_DAYS};
