//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration, builds the [`DataService`](crate::service::DataService)
//! once, and routes the subcommand to its implementation.

pub mod cache;
pub mod companies;
pub mod company;
pub mod current;
pub mod dispatcher;
pub mod display;
pub mod performance;
pub mod refresh;
pub mod search;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
