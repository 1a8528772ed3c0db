//! Companies command implementation.

use crate::cli::args::CompaniesArgs;
use crate::error::Result;
use crate::service::DataService;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::show_json;

/// The companies command implementation.
pub struct CompaniesCommand {
    args: CompaniesArgs,
}

impl CompaniesCommand {
    /// Create a new companies command.
    pub fn new(args: CompaniesArgs) -> Self {
        Self { args }
    }
}

impl Command for CompaniesCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let companies = service.all_companies(self.args.fetch.refresh);

        if self.args.fetch.json {
            show_json(ui, &companies)?;
            return Ok(CommandResult::success());
        }

        if companies.is_empty() {
            ui.message("No companies found");
            return Ok(CommandResult::success());
        }

        let mut table = Table::new(&["ID", "Name", "Location"]);
        for company in &companies {
            table.add_row([
                company.id.clone(),
                company.name.clone(),
                company.location.clone().unwrap_or_default(),
            ]);
        }
        ui.output(&table.render());

        Ok(CommandResult::success())
    }
}
