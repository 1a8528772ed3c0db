//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for building the data service and routing CLI
//!   subcommands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::cache::default_cache_dir;
use crate::cli::args::{Cli, Commands};
use crate::clock::SystemClock;
use crate::config::{load_config, validate, ServiceConfig};
use crate::error::Result;
use crate::service::DataService;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command against the data service.
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load and validate configuration, applying command-line overrides.
    pub fn load_config(&self, cli: &Cli) -> Result<ServiceConfig> {
        let mut config = load_config(&self.project_root, cli.config.as_deref())?;

        if let Some(url) = &cli.api_url {
            config.api_base_url = url.clone();
        }

        validate(&config)?;
        Ok(config)
    }

    /// Build the data service for a run.
    pub fn build_service(&self, cli: &Cli) -> Result<DataService> {
        let config = self.load_config(cli)?;
        let cache_dir = cli.cache_dir.clone().unwrap_or_else(default_cache_dir);
        debug!(
            "Using API {} with cache at {}",
            config.api_base_url,
            cache_dir.display()
        );

        let service = DataService::open(config, &cache_dir, Arc::new(SystemClock))?;
        Ok(match cli.today {
            Some(today) => service.with_today(today),
            None => service,
        })
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut service = self.build_service(cli)?;
        Self::run(&cli.command, &mut service, ui)
    }

    /// Execute a parsed subcommand against an existing service.
    pub fn run(
        command: &Commands,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Commands::Company(args) => {
                super::company::CompanyCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Companies(args) => {
                super::companies::CompaniesCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Performance(args) => {
                super::performance::PerformanceCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Current(args) => {
                super::current::CurrentCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Featured(args) => {
                super::current::FeaturedCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Search(args) => {
                super::search::SearchCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Refresh(args) => {
                super::refresh::RefreshCommand::new(args.clone()).execute(service, ui)
            }
            Commands::Cache(args) => {
                super::cache::CacheCommand::new(args.clone()).execute(service, ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn api_url_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yml");
        fs::write(&config_path, "api_base_url: http://from-file/api").unwrap();

        let cli = Cli::parse_from([
            "ballets",
            "--config",
            config_path.to_str().unwrap(),
            "--api-url",
            "http://from-flag/api",
            "companies",
        ]);
        let config = CommandDispatcher::new(temp.path().to_path_buf())
            .load_config(&cli)
            .unwrap();

        assert_eq!(config.api_base_url, "http://from-flag/api");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yml");
        fs::write(&config_path, "request_timeout_secs: 0").unwrap();

        let cli = Cli::parse_from([
            "ballets",
            "--config",
            config_path.to_str().unwrap(),
            "companies",
        ]);
        let result = CommandDispatcher::new(temp.path().to_path_buf()).load_config(&cli);

        assert!(result.is_err());
    }
}
