//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::cache::CacheArgs;
use crate::service::DEFAULT_FEATURED_COUNT;

/// Ballet company profiles and performance schedules.
#[derive(Debug, Parser)]
#[command(name = "ballets")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .ballets/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the ballet API
    #[arg(long, global = true, env = "BALLETS_API_URL")]
    pub api_url: Option<String>,

    /// Directory of the response cache
    #[arg(long, global = true, env = "BALLETS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Classify schedules as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a company profile and its season
    Company(CompanyArgs),

    /// List all companies
    Companies(CompaniesArgs),

    /// Show one performance
    Performance(PerformanceArgs),

    /// List current performances across companies
    Current(CurrentArgs),

    /// Show the featured performances
    Featured(FeaturedArgs),

    /// Search performances by title or description
    Search(SearchArgs),

    /// Clear the cache and refetch a company's data
    Refresh(RefreshArgs),

    /// Inspect or clear the response cache
    Cache(CacheArgs),
}

/// Options shared by every data command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FetchArgs {
    /// Skip the cache and fetch from the API
    #[arg(long)]
    pub refresh: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `company` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompanyArgs {
    /// Company ID (e.g. royal_ballet)
    #[arg(default_value = "")]
    pub company: String,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the `companies` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CompaniesArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the `performance` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PerformanceArgs {
    /// Company ID
    #[arg(default_value = "")]
    pub company: String,

    /// Performance ID
    #[arg(default_value = "")]
    pub performance: String,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the `current` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CurrentArgs {
    /// Maximum number of performances; omit for all
    #[arg(short, long)]
    pub limit: Option<u32>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the `featured` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FeaturedArgs {
    /// Number of performances
    #[arg(short = 'n', long, default_value_t = DEFAULT_FEATURED_COUNT)]
    pub count: u32,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SearchArgs {
    /// Text to look for
    #[arg(default_value = "")]
    pub query: String,

    /// Restrict to one company
    #[arg(long)]
    pub company: Option<String>,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Number of results to skip
    #[arg(long)]
    pub skip: Option<u32>,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Arguments for the `refresh` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RefreshArgs {
    /// Company ID
    #[arg(default_value = "")]
    pub company: String,

    /// Output the summary as JSON
    #[arg(long)]
    pub json: bool,
}
