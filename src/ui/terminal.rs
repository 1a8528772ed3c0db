//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{confirm, should_use_colors, BalletTheme, OutputMode, UserInterface};

/// Terminal UI implementation.
///
/// Results go to stdout. Prompts are only shown when the session is
/// interactive and stdout is a terminal.
pub struct TerminalUI {
    term: Term,
    theme: BalletTheme,
    mode: OutputMode,
    interactive: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, interactive: bool) -> Self {
        let theme = if should_use_colors() {
            BalletTheme::new()
        } else {
            BalletTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
            interactive,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        let err = Term::stderr();
        writeln!(&err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if !self.is_interactive() {
            return Ok(default);
        }
        confirm(question, default, &self.term)
    }

    fn is_interactive(&self) -> bool {
        self.interactive && self.term.is_term()
    }

    fn theme(&self) -> &BalletTheme {
        &self.theme
    }
}

/// Create the UI for a command run.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode, interactive))
}
