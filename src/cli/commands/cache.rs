//! Cache command implementation.
//!
//! Provides `ballets cache stats`, `ballets cache list` and
//! `ballets cache clear`.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cache::format_duration;
use crate::error::Result;
use crate::service::DataService;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::show_json;

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show cache statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List cached entries.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Clear the cache.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    fresh: usize,
    expired: usize,
    corrupt: usize,
    total: usize,
    total_bytes: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView {
    key: String,
    state: String,
    remaining_secs: i64,
    size_bytes: u64,
}

/// The cache command implementation.
pub struct CacheCommand {
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(args: CacheArgs) -> Self {
        Self { args }
    }
}

impl Command for CacheCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match &self.args.command {
            CacheSubcommand::Stats { json } => show_stats(service, *json, ui)?,
            CacheSubcommand::List { json } => list_cache(service, *json, ui)?,
            CacheSubcommand::Clear { force } => clear_cache(service, *force, ui)?,
        }

        Ok(CommandResult::success())
    }
}

fn show_stats(service: &DataService, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let stats = service.cache_stats();

    if json {
        return show_json(
            ui,
            &StatsView {
                fresh: stats.fresh,
                expired: stats.expired,
                corrupt: stats.corrupt,
                total: stats.total(),
                total_bytes: stats.total_bytes,
            },
        );
    }

    let settings = service.cache().settings();
    ui.output("Cache Statistics:\n");
    ui.output(&format!("  Total entries: {}", stats.total()));
    ui.output(&format!("  Fresh: {}", stats.fresh));
    ui.output(&format!("  Expired: {}", stats.expired));
    ui.output(&format!("  Corrupt: {}", stats.corrupt));
    ui.output(&format!("  Total size: {} bytes", stats.total_bytes));
    ui.output(&format!("  TTL: {}", format_duration(settings.ttl)));
    ui.output(&format!(
        "  Namespace: {}*_v{}",
        settings.prefix, settings.version
    ));

    Ok(())
}

fn list_cache(service: &DataService, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let entries = service.cache().entries();

    if json {
        let views: Vec<EntryView> = entries
            .iter()
            .map(|e| EntryView {
                key: e.key.clone(),
                state: e.state.to_string(),
                remaining_secs: e.remaining.num_seconds(),
                size_bytes: e.size_bytes,
            })
            .collect();
        return show_json(ui, &views);
    }

    if entries.is_empty() {
        ui.message("Cache is empty");
        return Ok(());
    }

    let mut table = Table::new(&["Key", "State", "Expires in", "Size"]);
    for entry in &entries {
        let remaining = if entry.remaining > chrono::Duration::zero() {
            format_duration(entry.remaining)
        } else {
            "-".to_string()
        };
        table.add_row([
            entry.key.clone(),
            entry.state.to_string(),
            remaining,
            format!("{} B", entry.size_bytes),
        ]);
    }
    ui.output(&table.render());

    Ok(())
}

fn clear_cache(service: &mut DataService, force: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let count = service.cache_stats().total();
    if count == 0 {
        ui.message("Cache is already empty");
        return Ok(());
    }

    if !force {
        let question = format!("Clear {} cached entries?", count);
        if !ui.confirm(&question, false)? {
            if ui.is_interactive() {
                ui.message("Cancelled");
            } else {
                ui.warning("Refusing to clear the cache without --force");
            }
            return Ok(());
        }
    }

    let cleared = service.clear_cache();
    ui.success(&format!("Cleared {} entries", cleared));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::clock::FixedClock;
    use crate::config::ServiceConfig;
    use crate::ui::MockUI;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn offline_service() -> DataService {
        let config = ServiceConfig {
            api_base_url: "http://127.0.0.1:1/api".to_string(),
            request_timeout_secs: 2,
            ..Default::default()
        };
        let clock = Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()));
        DataService::new(config, Box::new(MemoryStore::new()), clock).unwrap()
    }

    fn run(service: &mut DataService, command: CacheSubcommand, ui: &mut MockUI) {
        CacheCommand::new(CacheArgs { command })
            .execute(service, ui)
            .unwrap();
    }

    #[test]
    fn stats_on_empty_cache() {
        let mut service = offline_service();
        let mut ui = MockUI::new();

        run(&mut service, CacheSubcommand::Stats { json: false }, &mut ui);

        assert!(ui.output_text().contains("Total entries: 0"));
        assert!(ui.output_text().contains("TTL: 30d"));
    }

    #[test]
    fn clear_empty_cache() {
        let mut service = offline_service();
        let mut ui = MockUI::new();

        run(&mut service, CacheSubcommand::Clear { force: false }, &mut ui);

        assert!(ui.has_message("already empty"));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn non_interactive_clear_requires_force() {
        let mut service = offline_service();
        seed(&mut service);
        let mut ui = MockUI::new();

        run(&mut service, CacheSubcommand::Clear { force: false }, &mut ui);
        assert!(ui.has_warning("--force"));
        assert_eq!(service.cache_stats().total(), 1);

        run(&mut service, CacheSubcommand::Clear { force: true }, &mut ui);
        assert!(ui.has_success("Cleared 1 entries"));
        assert_eq!(service.cache_stats().total(), 0);
    }

    #[test]
    fn interactive_clear_asks_first() {
        let mut service = offline_service();
        seed(&mut service);
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.queue_confirm_answers(vec![false, true]);

        run(&mut service, CacheSubcommand::Clear { force: false }, &mut ui);
        assert!(ui.has_message("Cancelled"));
        assert_eq!(service.cache_stats().total(), 1);

        run(&mut service, CacheSubcommand::Clear { force: false }, &mut ui);
        assert_eq!(ui.prompts_shown().len(), 2);
        assert_eq!(service.cache_stats().total(), 0);
    }

    #[test]
    fn list_shows_entries() {
        let mut service = offline_service();
        seed(&mut service);
        let mut ui = MockUI::new();

        run(&mut service, CacheSubcommand::List { json: false }, &mut ui);

        let text = ui.output_text();
        assert!(text.contains("ballet_data_seed_v1.0"));
        assert!(text.contains("fresh"));
        assert!(text.contains("30d"));
    }

    // Fallback data is never cached, so write an entry directly.
    fn seed(service: &mut DataService) {
        service.cache_mut().set("seed", &serde_json::json!([1, 2, 3]));
    }
}
