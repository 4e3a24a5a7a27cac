//! The contract every shell command implements.

use clap::ArgMatches;

use crate::error::{Result, ShellError};
use crate::rpc::CallBatcher;
use crate::ui::UserInterface;

/// What the loop does after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// End the session.
    Exit,
}

/// Everything a command can touch while executing.
pub struct Context<'a> {
    /// Queue for remote calls; flushed by the shell after the command.
    pub daemon: &'a dyn CallBatcher,
    /// Output.
    pub ui: &'a mut dyn UserInterface,
}

/// One parsed command line.
#[derive(Debug)]
pub struct Invocation {
    command: String,
    args: Vec<String>,
    options: ArgMatches,
}

impl Invocation {
    pub(crate) fn new(command: &str, args: Vec<String>, options: ArgMatches) -> Self {
        Self {
            command: command.to_string(),
            args,
            options,
        }
    }

    /// The name the command was invoked by (may be an alias).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Positional arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The raw clap matches for the command's option schema.
    pub fn options(&self) -> &ArgMatches {
        &self.options
    }

    /// Value of a boolean flag; `false` if the flag is not in the schema.
    pub fn flag(&self, id: &str) -> bool {
        self.options
            .try_get_one::<bool>(id)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }

    /// Value of a single-valued string option.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.options
            .try_get_one::<String>(id)
            .ok()
            .flatten()
            .map(String::as_str)
    }

    /// Values of a multi-valued string option, in order.
    pub fn values(&self, id: &str) -> Vec<&str> {
        self.options
            .try_get_many::<String>(id)
            .ok()
            .flatten()
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// A shell command.
///
/// Instances are built once when the registry is assembled and shared by
/// every name they answer to. Option schemas must not declare positional
/// arguments: the parser collects those into [`Invocation::args`].
pub trait CommandSpec {
    /// Primary name.
    fn name(&self) -> &str;

    /// Additional names resolving to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line synopsis, e.g. `pause [ID]... [--all]`.
    fn usage(&self) -> &str;

    /// Long description. The first line is the summary shown by `help`.
    fn about(&self) -> Option<&str> {
        None
    }

    /// Add this command's flags and options to `cmd`.
    fn options(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Completion candidates for the word `text` spanning `begin..end` of
    /// `line` (leading whitespace already stripped).
    fn complete(&self, _text: &str, _line: &str, _begin: usize, _end: usize) -> Vec<String> {
        Vec::new()
    }

    /// Turn the raw argument string into tokens for the option parser.
    fn split(&self, raw: &str) -> Result<Vec<String>> {
        split_words(raw)
    }

    /// Run the command.
    fn execute(&self, ctx: &mut Context<'_>, invocation: &Invocation) -> Result<Flow>;
}

/// Entry in the static registration table.
#[derive(Clone, Copy)]
pub struct CommandFactory {
    /// Identifier; registered as the command's primary name. Entries
    /// starting with `_` are helpers and never registered.
    pub name: &'static str,
    /// Builds the command instance.
    pub build: fn() -> Result<Box<dyn CommandSpec>>,
}

impl std::fmt::Debug for CommandFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandFactory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// POSIX shell-word splitting honoring single and double quotes.
pub fn split_words(raw: &str) -> Result<Vec<String>> {
    shlex::split(raw).ok_or_else(|| ShellError::OptionParse {
        message: "No closing quotation".to_string(),
    })
}
