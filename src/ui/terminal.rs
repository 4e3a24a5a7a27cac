//! Terminal UI writing to standard output.

use console::Term;
use std::io::Write;

use crate::config::ColorChoice;
use crate::error::Result;

use super::{prompt_confirm, ProgressSpinner, ShellTheme, SpinnerHandle, UserInterface};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: ShellTheme,
}

impl TerminalUI {
    /// Create a new terminal UI honoring the color setting.
    pub fn new(color: ColorChoice) -> Self {
        Self {
            term: Term::stdout(),
            theme: ShellTheme::for_choice(color),
        }
    }

    /// The theme in use, shared with the prompt renderer.
    pub fn theme(&self) -> &ShellTheme {
        &self.theme
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn help_row(&mut self, width: usize, name: &str, description: &str) {
        writeln!(self.term, "{}", self.theme.format_help_row(width, name, description)).ok();
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if !self.term.is_term() {
            return Ok(default);
        }
        prompt_confirm(question, default, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.term.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}
