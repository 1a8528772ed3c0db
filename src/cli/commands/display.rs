//! Shared rendering of companies and performances.
//!
//! Used by every data command so listings look the same everywhere.

use serde::Serialize;

use crate::error::{BalletError, Result};
use crate::model::{Company, Performance};
use crate::ui::{BalletTheme, Table, UserInterface};

/// Shown instead of an empty date range.
pub const DATES_TBA: &str = "Dates to be announced";

/// Short schedule label for a classified performance.
pub fn status_label(performance: &Performance) -> &'static str {
    if performance.is_past {
        "Ended"
    } else if performance.is_next {
        "Next"
    } else if performance.is_current {
        "Now showing"
    } else {
        "Upcoming"
    }
}

/// Schedule label styled by the theme.
pub fn styled_status(performance: &Performance, theme: &BalletTheme) -> String {
    let label = status_label(performance);
    let style = if performance.is_past {
        &theme.past
    } else if performance.is_next {
        &theme.next
    } else if performance.is_current {
        &theme.current
    } else {
        &theme.dim
    };
    style.apply_to(label).to_string()
}

/// Date range or the "to be announced" placeholder.
pub fn dates(performance: &Performance) -> String {
    let range = performance.date_range();
    if range.is_empty() {
        DATES_TBA.to_string()
    } else {
        range
    }
}

/// Print a value as pretty JSON.
pub fn show_json<T: Serialize + ?Sized>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| BalletError::Serialization {
        context: "command output".to_string(),
        message: e.to_string(),
    })?;
    ui.output(&json);
    Ok(())
}

/// Print a table of performances.
///
/// `with_company` adds a company column for listings that span companies.
pub fn show_performances(
    ui: &mut dyn UserInterface,
    performances: &[Performance],
    with_company: bool,
) {
    if performances.is_empty() {
        ui.message("No performances found");
        return;
    }

    let mut headers = vec!["Status", "Title", "Dates", "Venue"];
    if with_company {
        headers.push("Company");
    }

    let mut table = Table::new(&headers);
    for performance in performances {
        let mut row = vec![
            styled_status(performance, ui.theme()),
            performance.title.clone(),
            dates(performance),
            performance.venue.clone(),
        ];
        if with_company {
            row.push(
                performance
                    .company_name
                    .clone()
                    .or_else(|| performance.company.clone())
                    .unwrap_or_default(),
            );
        }
        table.add_row(row);
    }

    ui.output(&table.render());
}

/// Print one performance in full.
pub fn show_performance(ui: &mut dyn UserInterface, performance: &Performance) {
    let theme = ui.theme().clone();

    ui.output(&theme.highlight.apply_to(&performance.title).to_string());
    ui.output(&theme.format_field("Status", &styled_status(performance, &theme)));
    ui.output(&theme.format_field("Dates", &dates(performance)));
    if !performance.venue.is_empty() {
        ui.output(&theme.format_field("Venue", &performance.venue));
    }
    if let Some(company) = performance.company_name.as_ref().or(performance.company.as_ref()) {
        ui.output(&theme.format_field("Company", company));
    }
    if let Some(video) = &performance.video_url {
        ui.output(&theme.format_field("Video", video));
    }
    ui.output(&theme.format_field("Image", &performance.image_url));
    ui.output("");
    ui.output(&performance.description);
}

/// Print a company profile.
pub fn show_company(ui: &mut dyn UserInterface, company: &Company) {
    let theme = ui.theme().clone();

    ui.output(&theme.highlight.apply_to(&company.name).to_string());
    if let Some(location) = &company.location {
        ui.output(&theme.format_field("Location", location));
    }
    if let Some(founded) = company.founded {
        ui.output(&theme.format_field("Founded", &founded.to_string()));
    }
    if let Some(website) = &company.website {
        ui.output(&theme.format_field("Website", website));
    }
    if !company.description.is_empty() {
        ui.output("");
        ui.output(&company.description);
    }
}
