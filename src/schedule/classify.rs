//! Past / current / next classification of performances.
//!
//! Every function here is pure over a reference date. Performances with an
//! invalid start or end date are never current and never next; they are
//! only past when their end date is a valid date before `today`.

use chrono::{Duration, NaiveDate};
use std::cmp::Ordering;

use crate::model::Performance;

/// Default lookahead horizon, in days, for "current" performances.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Tunables for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierSettings {
    /// A performance that has not started yet counts as current when it
    /// starts within this many days (inclusive).
    pub horizon_days: u32,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl ClassifierSettings {
    /// Last start date that still counts as current for `today`.
    ///
    /// `None` when the horizon reaches past the last representable date,
    /// which leaves it unbounded.
    pub fn horizon_end(&self, today: NaiveDate) -> Option<NaiveDate> {
        Duration::try_days(i64::from(self.horizon_days))
            .and_then(|horizon| today.checked_add_signed(horizon))
    }
}

/// Whether the run has finished before `today`.
///
/// A run whose valid start lies after its valid end is always past.
pub fn is_past(performance: &Performance, today: NaiveDate) -> bool {
    match (performance.start_date.date(), performance.end_date.date()) {
        (Some(start), Some(end)) if start > end => true,
        (_, Some(end)) => end < today,
        (_, None) => false,
    }
}

/// Whether the run is under way on `today` or starts within the horizon.
pub fn is_current(performance: &Performance, today: NaiveDate, settings: &ClassifierSettings) -> bool {
    if is_past(performance, today) {
        return false;
    }

    let (Some(start), Some(end)) = (performance.start_date.date(), performance.end_date.date())
    else {
        return false;
    };

    let running = start <= today && today <= end;
    let imminent = start > today
        && settings
            .horizon_end(today)
            .map_or(true, |horizon_end| start <= horizon_end);
    running || imminent
}

fn is_upcoming(performance: &Performance, today: NaiveDate) -> bool {
    match (performance.start_date.date(), performance.end_date.date()) {
        (Some(start), Some(end)) => start > today && end >= today && start <= end,
        _ => false,
    }
}

/// Index of the soonest performance that has not started yet.
///
/// Candidates must start after `today` and not have ended. Ties on the
/// start date go to the earlier element.
pub fn next_upcoming_index(performances: &[Performance], today: NaiveDate) -> Option<usize> {
    performances
        .iter()
        .enumerate()
        .filter(|(_, p)| is_upcoming(p, today))
        .min_by_key(|(_, p)| p.start_date.date())
        .map(|(index, _)| index)
}

/// The soonest performance that has not started yet.
pub fn next_upcoming(performances: &[Performance], today: NaiveDate) -> Option<&Performance> {
    next_upcoming_index(performances, today).map(|index| &performances[index])
}

/// Stable ascending sort by start date; invalid dates go last.
pub fn sort_by_start_date(performances: &mut [Performance]) {
    performances.sort_by(|a, b| match (a.start_date.date(), b.start_date.date()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Split into `(past, current_or_upcoming)`, preserving order within each.
pub fn partition(
    performances: Vec<Performance>,
    today: NaiveDate,
) -> (Vec<Performance>, Vec<Performance>) {
    performances
        .into_iter()
        .partition(|p| is_past(p, today))
}

/// Set `is_past`, `is_current` and `is_next` on every performance.
pub fn annotate(performances: &mut [Performance], today: NaiveDate, settings: &ClassifierSettings) {
    let next = next_upcoming_index(performances, today);

    for (index, performance) in performances.iter_mut().enumerate() {
        performance.is_past = is_past(performance, today);
        performance.is_current = is_current(performance, today, settings);
        performance.is_next = next == Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CalendarDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn offset(days: i64) -> NaiveDate {
        today() + Duration::days(days)
    }

    fn perf(id: &str, start: i64, end: i64) -> Performance {
        Performance::new(id, id, offset(start), offset(end))
    }

    fn settings() -> ClassifierSettings {
        ClassifierSettings::default()
    }

    #[test]
    fn past_depends_only_on_end_date() {
        for start in [-100, -10, -1] {
            assert!(is_past(&perf("a", start, -1), today()));
            assert!(!is_past(&perf("a", start, 0), today()));
            assert!(!is_past(&perf("a", start, 5), today()));
        }
    }

    #[test]
    fn inverted_range_is_past() {
        assert!(is_past(&perf("a", 20, 10), today()));
        assert!(!is_current(&perf("a", 20, 10), today(), &settings()));
    }

    #[test]
    fn past_dominates_current() {
        let p = perf("a", -40, -10);
        assert!(is_past(&p, today()));
        assert!(!is_current(&p, today(), &settings()));
    }

    #[test]
    fn running_show_is_current() {
        assert!(is_current(&perf("a", -3, 3), today(), &settings()));
        assert!(is_current(&perf("a", 0, 0), today(), &settings()));
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        assert!(is_current(&perf("a", 30, 40), today(), &settings()));
        assert!(!is_current(&perf("a", 31, 40), today(), &settings()));
    }

    #[test]
    fn custom_horizon() {
        let narrow = ClassifierSettings { horizon_days: 7 };
        assert!(is_current(&perf("a", 7, 9), today(), &narrow));
        assert!(!is_current(&perf("a", 8, 9), today(), &narrow));
    }

    #[test]
    fn huge_horizon_is_unbounded() {
        let wide = ClassifierSettings {
            horizon_days: u32::MAX,
        };
        assert_eq!(wide.horizon_end(today()), None);
        assert!(is_current(&perf("a", 4000, 4010), today(), &wide));
        assert!(!is_current(&perf("b", -10, -5), today(), &wide));
    }

    #[test]
    fn scenario_from_listing_page() {
        let within = perf("within", 5, 20);
        assert!(!is_past(&within, today()));
        assert!(is_current(&within, today(), &settings()));

        let finished = perf("finished", -40, -10);
        assert!(is_past(&finished, today()));
        assert!(!is_current(&finished, today(), &settings()));

        let distant = perf("distant", 45, 60);
        assert!(!is_past(&distant, today()));
        assert!(!is_current(&distant, today(), &settings()));
    }

    #[test]
    fn invalid_dates_fail_open() {
        let mut p = perf("a", 1, 5);
        p.start_date = CalendarDate::parse("soon");
        assert!(!is_past(&p, today()));
        assert!(!is_current(&p, today(), &settings()));
        assert_eq!(next_upcoming(&[p], today()), None);

        let mut q = perf("b", -5, 5);
        q.end_date = CalendarDate::default();
        assert!(!is_past(&q, today()));
        assert!(!is_current(&q, today(), &settings()));
    }

    #[test]
    fn next_upcoming_ignores_input_order() {
        let forward = vec![perf("ten", 10, 12), perf("five", 5, 7)];
        assert_eq!(next_upcoming(&forward, today()).unwrap().id, "five");

        let reversed = vec![perf("five", 5, 7), perf("ten", 10, 12)];
        assert_eq!(next_upcoming(&reversed, today()).unwrap().id, "five");
    }

    #[test]
    fn next_upcoming_empty_is_none() {
        assert_eq!(next_upcoming(&[], today()), None);
        let started = vec![perf("running", -1, 4), perf("over", -9, -2)];
        assert_eq!(next_upcoming(&started, today()), None);
    }

    #[test]
    fn next_upcoming_tie_keeps_first() {
        let tied = vec![perf("first", 5, 6), perf("second", 5, 9)];
        assert_eq!(next_upcoming(&tied, today()).unwrap().id, "first");
    }

    #[test]
    fn next_upcoming_skips_show_starting_today() {
        let list = vec![perf("today", 0, 3), perf("tomorrow", 1, 3)];
        assert_eq!(next_upcoming(&list, today()).unwrap().id, "tomorrow");
    }

    #[test]
    fn sort_is_stable_with_invalid_last() {
        let mut bad = perf("bad", 0, 0);
        bad.start_date = CalendarDate::default();
        let mut list = vec![
            bad,
            perf("late", 9, 10),
            perf("early-a", 1, 2),
            perf("early-b", 1, 5),
        ];

        sort_by_start_date(&mut list);

        let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["early-a", "early-b", "late", "bad"]);
    }

    #[test]
    fn partition_splits_on_past() {
        let list = vec![perf("old", -9, -2), perf("now", -1, 1), perf("older", -30, -20)];
        let (past, upcoming) = partition(list, today());

        let past_ids: Vec<_> = past.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(past_ids, ["old", "older"]);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "now");
    }

    #[test]
    fn annotate_marks_exactly_one_next() {
        let mut list = vec![
            perf("over", -20, -5),
            perf("running", -2, 2),
            perf("soon", 4, 6),
            perf("later", 50, 55),
        ];

        annotate(&mut list, today(), &settings());

        assert!(list[0].is_past && !list[0].is_current && !list[0].is_next);
        assert!(!list[1].is_past && list[1].is_current && !list[1].is_next);
        assert!(list[2].is_current && list[2].is_next);
        assert!(!list[3].is_current && !list[3].is_next);
        assert_eq!(list.iter().filter(|p| p.is_next).count(), 1);
    }
}
