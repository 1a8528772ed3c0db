//! Recording UI for command tests.
//!
//! ```
//! use world_ballets::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Loading");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Loading"));
//! assert!(ui.has_success("Done!"));
//! ```

use std::collections::VecDeque;

use crate::error::Result;

use super::{BalletTheme, OutputMode, UserInterface};

/// Which `UserInterface` method produced a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Output,
    Message,
    Success,
    Warning,
    Error,
    Header,
}

/// A `UserInterface` that records everything it is asked to show.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    theme: BalletTheme,
    lines: Vec<(Channel, String)>,
    confirm_answers: VecDeque<bool>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// A non-interactive, uncolored recorder in normal mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            theme: BalletTheme::plain(),
            ..Default::default()
        }
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Queue answers for upcoming confirmations.
    ///
    /// When the queue is empty the question's default is used.
    pub fn queue_confirm_answers(&mut self, answers: Vec<bool>) {
        self.confirm_answers.extend(answers);
    }

    /// Lines recorded on one channel, in order.
    pub fn lines(&self, channel: Channel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// Result output only.
    pub fn outputs(&self) -> Vec<&str> {
        self.lines(Channel::Output)
    }

    /// Result output joined by newlines.
    pub fn output_text(&self) -> String {
        self.outputs().join("\n")
    }

    /// Questions asked through `confirm`.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Whether any line on `channel` contains `needle`.
    pub fn saw(&self, channel: Channel, needle: &str) -> bool {
        self.lines
            .iter()
            .any(|(c, text)| *c == channel && text.contains(needle))
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.saw(Channel::Message, needle)
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.saw(Channel::Success, needle)
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.saw(Channel::Warning, needle)
    }

    fn record(&mut self, channel: Channel, text: &str) {
        self.lines.push((channel, text.to_string()));
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn output(&mut self, text: &str) {
        self.record(Channel::Output, text);
    }

    fn message(&mut self, msg: &str) {
        self.record(Channel::Message, msg);
    }

    fn success(&mut self, msg: &str) {
        self.record(Channel::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.record(Channel::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.record(Channel::Error, msg);
    }

    fn show_header(&mut self, title: &str) {
        self.record(Channel::Header, title);
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.prompts_shown.push(question.to_string());
        if !self.interactive {
            return Ok(default);
        }
        Ok(self.confirm_answers.pop_front().unwrap_or(default))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn theme(&self) -> &BalletTheme {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_per_channel() {
        let mut ui = MockUI::new();
        ui.output("result");
        ui.message("status");
        ui.error("bad");
        ui.show_header("Past performances");

        assert_eq!(ui.outputs(), ["result"]);
        assert!(ui.has_message("status"));
        assert!(ui.saw(Channel::Error, "bad"));
        assert_eq!(ui.lines(Channel::Header), ["Past performances"]);
        assert!(!ui.has_warning("bad"));
    }

    #[test]
    fn non_interactive_confirm_returns_default() {
        let mut ui = MockUI::new();
        ui.queue_confirm_answers(vec![true]);

        assert!(!ui.confirm("Clear cache?", false).unwrap());
        assert_eq!(ui.prompts_shown(), ["Clear cache?"]);
    }

    #[test]
    fn interactive_confirm_uses_queued_answers() {
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        ui.queue_confirm_answers(vec![true, false]);

        assert!(ui.confirm("First?", false).unwrap());
        assert!(!ui.confirm("Second?", true).unwrap());
        assert!(ui.confirm("Third?", true).unwrap());
    }
}
