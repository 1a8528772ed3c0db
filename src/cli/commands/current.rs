//! Current and featured listing commands.

use crate::cli::args::{CurrentArgs, FeaturedArgs};
use crate::error::Result;
use crate::service::DataService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_performances};

/// The current command implementation.
pub struct CurrentCommand {
    args: CurrentArgs,
}

impl CurrentCommand {
    /// Create a new current command.
    pub fn new(args: CurrentArgs) -> Self {
        Self { args }
    }
}

impl Command for CurrentCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let refresh = self.args.fetch.refresh;
        let performances = match self.args.limit {
            Some(limit) => service.current_performances(limit, refresh),
            None => service.all_current_performances(refresh),
        };

        if self.args.fetch.json {
            show_json(ui, &performances)?;
        } else {
            ui.show_header("Current performances");
            show_performances(ui, &performances, true);
        }

        Ok(CommandResult::success())
    }
}

/// The featured command implementation.
pub struct FeaturedCommand {
    args: FeaturedArgs,
}

impl FeaturedCommand {
    /// Create a new featured command.
    pub fn new(args: FeaturedArgs) -> Self {
        Self { args }
    }
}

impl Command for FeaturedCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let performances = service.featured_performances(self.args.count, self.args.fetch.refresh);

        if self.args.fetch.json {
            show_json(ui, &performances)?;
        } else {
            ui.show_header("Featured performances");
            show_performances(ui, &performances, true);
        }

        Ok(CommandResult::success())
    }
}
