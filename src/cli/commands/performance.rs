//! Performance command implementation.

use crate::cli::args::PerformanceArgs;
use crate::error::{BalletError, Result};
use crate::service::DataService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_performance};

/// The performance command implementation.
pub struct PerformanceCommand {
    args: PerformanceArgs,
}

impl PerformanceCommand {
    /// Create a new performance command.
    pub fn new(args: PerformanceArgs) -> Self {
        Self { args }
    }
}

impl Command for PerformanceCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let performance = service
            .performance_details(
                &self.args.company,
                &self.args.performance,
                self.args.fetch.refresh,
            )?
            .ok_or_else(|| BalletError::NotFound {
                what: format!(
                    "performance '{}' of '{}'",
                    self.args.performance, self.args.company
                ),
            })?;

        if self.args.fetch.json {
            show_json(ui, &performance)?;
        } else {
            show_performance(ui, &performance);
        }

        Ok(CommandResult::success())
    }
}
