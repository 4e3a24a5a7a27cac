//! nullsh - an interactive command shell for a remote torrent daemon.
//!
//! The shell reads a line, resolves its first word to a registered command,
//! parses the command's options, runs it and flushes the remote calls it
//! queued, then loops.
//!
//! # Modules
//!
//! - [`cli`] - Process arguments and the torrent commands
//! - [`config`] - Configuration loading, overrides and validation
//! - [`error`] - Error types and result aliases
//! - [`rpc`] - Batched remote calls to the daemon
//! - [`shell`] - Registry, option parsing, completion and the loop
//! - [`ui`] - Terminal output, tables, prompts and spinners
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use nullsh::cli::command_table;
//! use nullsh::rpc::MockDaemon;
//! use nullsh::shell::{CommandRegistry, Shell};
//! use nullsh::ui::MockUI;
//! use serde_json::json;
//!
//! let daemon = MockDaemon::new();
//! daemon.respond("core.get_session_state", json!(["abc"]));
//! let mut ui = MockUI::new();
//!
//! let registry = Rc::new(CommandRegistry::discover(command_table()));
//! let outcome = Shell::new(registry, &daemon, &mut ui).run_once("pause abc");
//!
//! assert!(!outcome.is_error());
//! assert_eq!(daemon.params_for("core.pause_torrent"), vec![vec![json!(["abc"])]]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod rpc;
pub mod shell;
pub mod ui;

pub use error::{Result, ShellError};
