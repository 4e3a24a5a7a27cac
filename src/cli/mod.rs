//! Process command line and the shell's commands.
//!
//! - [`args`] - process arguments using clap's derive macros
//! - [`commands`] - the torrent commands and their registration table

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::command_table;
