//! Search command implementation.

use crate::api::SearchOptions;
use crate::cli::args::SearchArgs;
use crate::error::Result;
use crate::service::DataService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_performances};

/// The search command implementation.
pub struct SearchCommand {
    args: SearchArgs,
}

impl SearchCommand {
    /// Create a new search command.
    pub fn new(args: SearchArgs) -> Self {
        Self { args }
    }

    fn options(&self) -> SearchOptions {
        SearchOptions {
            company: self.args.company.clone(),
            limit: self.args.limit,
            skip: self.args.skip,
        }
    }
}

impl Command for SearchCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if self.args.query.trim().is_empty() {
            ui.warning("Nothing to search for");
        }

        let results = service.search(&self.args.query, &self.options(), self.args.fetch.refresh);

        if self.args.fetch.json {
            show_json(ui, &results)?;
        } else {
            show_performances(ui, &results, true);
        }

        Ok(CommandResult::success())
    }
}
