//! Ballet REST API access.
//!
//! - [`client`] - Blocking HTTP client and endpoint helpers
//! - [`normalize`] - Upstream payload shapes and defaulting

pub mod client;
pub mod normalize;

pub use client::{ApiClient, SearchOptions, DEFAULT_TIMEOUT};
pub use normalize::{
    normalize_listing, PerformanceListing, RawPerformance, NO_DESCRIPTION, UNTITLED,
};
