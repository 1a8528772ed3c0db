//! Company command implementation.
//!
//! `ballets company <id>` shows the profile and the season: current and
//! upcoming performances with the next one marked, then past performances
//! unless the company hides them.

use serde::Serialize;

use crate::cli::args::CompanyArgs;
use crate::error::{BalletError, Result};
use crate::model::Company;
use crate::schedule::CompanySchedule;
use crate::service::DataService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_company, show_json, show_performances};

#[derive(Serialize)]
struct CompanyView<'a> {
    company: &'a Company,
    schedule: &'a CompanySchedule,
}

/// The company command implementation.
pub struct CompanyCommand {
    args: CompanyArgs,
}

impl CompanyCommand {
    /// Create a new company command.
    pub fn new(args: CompanyArgs) -> Self {
        Self { args }
    }
}

impl Command for CompanyCommand {
    fn execute(
        &self,
        service: &mut DataService,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let id = self.args.company.as_str();
        let refresh = self.args.fetch.refresh;

        let company = service
            .company_info(id, refresh)?
            .ok_or_else(|| BalletError::NotFound {
                what: format!("company '{}'", id),
            })?;
        let schedule = service.company_schedule(id, refresh)?;

        if self.args.fetch.json {
            show_json(
                ui,
                &CompanyView {
                    company: &company,
                    schedule: &schedule,
                },
            )?;
            return Ok(CommandResult::success());
        }

        show_company(ui, &company);

        ui.show_header("Current & upcoming");
        show_performances(ui, &schedule.upcoming, false);

        if schedule.shows_past {
            ui.show_header("Past performances");
            show_performances(ui, &schedule.past, false);
        }

        Ok(CommandResult::success())
    }
}
