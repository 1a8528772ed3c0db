//! Configuration file discovery and loading.
//!
//! Files are layered in this order, later ones overriding earlier ones:
//! 1. User global config (`~/.ballets/config.yml`)
//! 2. Project config (`.ballets/config.yml`)
//!
//! An explicit `--config` path replaces discovery entirely. When no file
//! exists at all the built-in defaults are used.

use crate::config::merger::merge_configs;
use crate::config::schema::ServiceConfig;
use crate::error::{BalletError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".ballets";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.ballets/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .ballets/config.yml
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: dirs::home_dir().and_then(|home| existing(home.join(CONFIG_DIR))),
            project: existing(project_root.join(CONFIG_DIR)),
        }
    }

    /// Existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }

    /// Whether any config file was found.
    pub fn is_empty(&self) -> bool {
        self.user_global.is_none() && self.project.is_none()
    }
}

fn existing(dir: PathBuf) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ServiceConfig> {
    let value = load_config_value(path)?;
    from_value(value, path)
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ServiceConfig> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| BalletError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;
    from_value(value, source_path)
}

/// Load a config file as a raw YAML value, for merging.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BalletError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BalletError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| BalletError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// An empty file parses to null, which means "all defaults".
fn from_value(value: serde_yaml::Value, path: &Path) -> Result<ServiceConfig> {
    if value.is_null() {
        return Ok(ServiceConfig::default());
    }

    serde_yaml::from_value(value).map_err(|e| BalletError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every discovered config file.
pub fn load_merged_config(project_root: &Path) -> Result<ServiceConfig> {
    let paths = ConfigPaths::discover(project_root);
    load_paths(&paths, project_root)
}

fn load_paths(paths: &ConfigPaths, project_root: &Path) -> Result<ServiceConfig> {
    if paths.is_empty() {
        debug!("No configuration file found, using defaults");
        return Ok(ServiceConfig::default());
    }

    let mut configs = Vec::new();
    for path in paths.all_existing() {
        debug!("Loading configuration from {}", path.display());
        let value = load_config_value(path)?;
        if !value.is_null() {
            configs.push(value);
        }
    }

    let merged = merge_configs(&configs);
    from_value(merged, &project_root.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ServiceConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}
