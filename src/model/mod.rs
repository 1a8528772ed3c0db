//! Domain records shared by the API client, the cache and the fallback catalog.

pub mod company;
pub mod date;
pub mod performance;

pub use company::Company;
pub use date::{format_date_range, CalendarDate};
pub use performance::Performance;
