//! Refresh command implementation.
//!
//! `ballets refresh <company>` drops every cached response and refetches
//! what the company page shows.

use crate::cli::args::RefreshArgs;
use crate::error::Result;
use crate::service::DataService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_json;

/// The refresh command implementation.
pub struct RefreshCommand {
    args: RefreshArgs,
}

impl RefreshCommand {
    /// Create a new refresh command.
    pub fn new(args: RefreshArgs) -> Self {
        Self { args }
    }
}

impl Command for RefreshCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let summary = service.invalidate_and_refetch(&self.args.company)?;

        if self.args.json {
            show_json(ui, &summary)?;
            return Ok(CommandResult::success());
        }

        ui.message(&format!("Cleared {} cached entries", summary.cleared));
        if !summary.company_found {
            ui.warning(&format!("Company '{}' not found", self.args.company));
        }
        ui.success(&format!(
            "Refreshed {}: {} performances, {} current, {} featured",
            self.args.company, summary.performances, summary.current, summary.featured
        ));

        Ok(CommandResult::success())
    }
}
