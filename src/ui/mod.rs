//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage, interactive or not
//! - [`MockUI`] for capturing output in tests
//! - Confirmation prompts, tables and the color theme
//!
//! # Example
//!
//! ```
//! use world_ballets::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Current performances");
//! ui.success("Cache cleared");
//! ```

pub mod mock;
pub mod output;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{Channel, MockUI};
pub use output::OutputMode;
pub use prompts::confirm;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, BalletTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Command handlers only talk to this trait, so tests can capture output
/// with [`MockUI`].
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Print command results. Shown in every mode.
    fn output(&mut self, text: &str);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show a section header.
    fn show_header(&mut self, title: &str);

    /// Ask a yes/no question. Non-interactive sessions get `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;

    /// The color theme used for rendering.
    fn theme(&self) -> &BalletTheme;
}
