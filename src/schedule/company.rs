//! A company's season arranged for display.

use chrono::NaiveDate;
use serde::Serialize;

use super::classify::{annotate, partition, sort_by_start_date, ClassifierSettings};
use crate::model::Performance;

/// Performances of one company, sorted, annotated and split into sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySchedule {
    /// Current and upcoming performances in start date order.
    pub upcoming: Vec<Performance>,
    /// Finished performances in start date order. Empty when the company
    /// hides its past season.
    pub past: Vec<Performance>,
    /// Whether the past section is shown at all.
    pub shows_past: bool,
}

impl CompanySchedule {
    /// Sort, classify and split a company's performances.
    pub fn build(
        mut performances: Vec<Performance>,
        today: NaiveDate,
        settings: &ClassifierSettings,
        show_past: bool,
    ) -> Self {
        sort_by_start_date(&mut performances);
        annotate(&mut performances, today, settings);

        let (past, upcoming) = partition(performances, today);

        Self {
            upcoming,
            past: if show_past { past } else { Vec::new() },
            shows_past: show_past,
        }
    }

    /// The performance flagged as next, if any.
    pub fn next(&self) -> Option<&Performance> {
        self.upcoming.iter().find(|p| p.is_next)
    }

    /// Performances flagged current.
    pub fn current(&self) -> impl Iterator<Item = &Performance> {
        self.upcoming.iter().filter(|p| p.is_current)
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn perf(id: &str, start: i64, end: i64) -> Performance {
        Performance::new(
            id,
            id,
            today() + Duration::days(start),
            today() + Duration::days(end),
        )
    }

    fn season() -> Vec<Performance> {
        vec![
            perf("nutcracker", 180, 200),
            perf("giselle", -40, -10),
            perf("swan_lake", 12, 20),
            perf("spartacus", -3, 4),
        ]
    }

    #[test]
    fn build_sorts_and_splits() {
        let schedule = CompanySchedule::build(season(), today(), &ClassifierSettings::default(), true);

        let upcoming: Vec<_> = schedule.upcoming.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(upcoming, ["spartacus", "swan_lake", "nutcracker"]);
        assert_eq!(schedule.past.len(), 1);
        assert_eq!(schedule.past[0].id, "giselle");
        assert!(schedule.past[0].is_past);
    }

    #[test]
    fn next_and_current() {
        let schedule = CompanySchedule::build(season(), today(), &ClassifierSettings::default(), true);

        assert_eq!(schedule.next().unwrap().id, "swan_lake");
        let current: Vec<_> = schedule.current().map(|p| p.id.as_str()).collect();
        assert_eq!(current, ["spartacus", "swan_lake"]);
    }

    #[test]
    fn hidden_past_section() {
        let schedule = CompanySchedule::build(season(), today(), &ClassifierSettings::default(), false);

        assert!(schedule.past.is_empty());
        assert!(!schedule.shows_past);
        assert_eq!(schedule.upcoming.len(), 3);
    }

    #[test]
    fn empty_season() {
        let schedule = CompanySchedule::build(Vec::new(), today(), &ClassifierSettings::default(), true);
        assert!(schedule.is_empty());
        assert!(schedule.next().is_none());
    }
}
