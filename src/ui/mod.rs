//! Terminal output components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for the real terminal
//! - [`MockUI`] capturing everything for assertions
//! - Tables, confirm prompts and the flush spinner
//!
//! # Example
//!
//! ```
//! use nullsh::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("ready");
//! ui.error("unknown command: frob");
//! assert!(ui.has_error("frob"));
//! ```

pub mod mock;
pub mod prompts;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use prompts::prompt_confirm;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ShellTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// Everything the shell and its commands print goes through this trait so
/// tests can capture it.
pub trait UserInterface {
    /// Display a plain line.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a rendered table.
    fn table(&mut self, table: &Table) {
        self.message(&table.render());
    }

    /// Display one row of the `help` listing, the name padded to `width`.
    fn help_row(&mut self, width: usize, name: &str, description: &str) {
        self.message(&ShellTheme::plain().format_help_row(width, name, description));
    }

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running attached to a terminal.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Remove the spinner from the screen.
    fn finish(&mut self);
}
