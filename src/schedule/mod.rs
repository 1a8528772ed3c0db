//! Performance schedule classification.
//!
//! This module decides whether a performance is past, current, or the next
//! one to open, relative to a reference date, and arranges a company's
//! season into display sections.
//!
//! "Current" is deliberately wide: it covers runs under way today and runs
//! opening within [`ClassifierSettings::horizon_days`].

pub mod classify;
pub mod company;

pub use classify::{
    annotate, is_current, is_past, next_upcoming, next_upcoming_index, partition,
    sort_by_start_date, ClassifierSettings, DEFAULT_HORIZON_DAYS,
};
pub use company::CompanySchedule;
