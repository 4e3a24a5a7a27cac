//! The command-dispatch shell.
//!
//! A line goes through these steps:
//!
//! 1. [`CommandRegistry::resolve`] maps the first word to a built-in or a
//!    registered [`CommandSpec`]
//! 2. the rest of the line is tokenized with [`CommandSpec::split`] and
//!    parsed by [`parse_options`]
//! 3. [`CommandSpec::execute`] runs, queueing remote calls
//! 4. [`Shell`] flushes the queued calls
//!
//! Errors at any step are printed and the loop carries on.

pub mod builtins;
pub mod command;
pub mod completion;
pub mod dispatcher;
pub mod input;
pub mod options;
pub mod registry;

pub use builtins::NO_HELP;
pub use command::{split_words, CommandFactory, CommandSpec, Context, Flow, Invocation};
pub use completion::{complete_flags, BufferSnapshot, CompletionEngine};
pub use dispatcher::{Outcome, Shell, DEFAULT_PROMPT};
pub use input::{EditorInput, LineSource, ScriptedInput, StdinInput};
pub use options::{parse_options, render_help, ParseOutcome, ARGS_ID};
pub use registry::{Builtin, CommandRegistry, Resolved};
