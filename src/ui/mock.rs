//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. Confirm prompts answer from a queue.
//!
//! # Example
//!
//! ```
//! use nullsh::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_confirm(false);
//!
//! ui.message("Removing 2 torrents");
//! assert!(!ui.confirm("Really?", true).unwrap());
//!
//! assert!(ui.has_message("Removing"));
//! assert_eq!(ui.confirms_shown(), ["Really?".to_string()]);
//! ```

use std::collections::VecDeque;

use crate::error::Result;

use super::{SpinnerHandle, Table, UserInterface};

/// Which channel a captured line was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Message,
    Success,
    Warning,
    Error,
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    transcript: Vec<(Channel, String)>,
    tables: Vec<String>,
    spinners: Vec<String>,
    confirm_answers: VecDeque<bool>,
    confirms_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirm prompt.
    ///
    /// With an empty queue, prompts answer with their default.
    pub fn queue_confirm(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Every captured line, in the order it was written.
    pub fn transcript(&self) -> &[(Channel, String)] {
        &self.transcript
    }

    /// Get all captured plain messages.
    pub fn messages(&self) -> Vec<String> {
        self.on(Channel::Message)
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> Vec<String> {
        self.on(Channel::Success)
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> Vec<String> {
        self.on(Channel::Warning)
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> Vec<String> {
        self.on(Channel::Error)
    }

    /// Get every rendered table.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get every confirm question that was asked.
    pub fn confirms_shown(&self) -> &[String] {
        &self.confirms_shown
    }

    /// Check if a plain message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.contains(Channel::Message, msg)
    }

    /// Check if a success containing `msg` was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.contains(Channel::Success, msg)
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.contains(Channel::Warning, msg)
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.contains(Channel::Error, msg)
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.tables.clear();
        self.spinners.clear();
        self.confirms_shown.clear();
    }

    fn on(&self, channel: Channel) -> Vec<String> {
        self.transcript
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn contains(&self, channel: Channel, needle: &str) -> bool {
        self.transcript
            .iter()
            .any(|(c, line)| *c == channel && line.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.transcript.push((Channel::Message, msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.transcript.push((Channel::Success, msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.transcript.push((Channel::Warning, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.transcript.push((Channel::Error, msg.to_string()));
    }

    fn table(&mut self, table: &Table) {
        let rendered = table.render();
        self.tables.push(rendered.clone());
        self.transcript.push((Channel::Message, rendered));
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.confirms_shown.push(question.to_string());
        Ok(self.confirm_answers.pop_front().unwrap_or(default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that records its final state.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finished: bool,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `finish` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
