//! Process argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

/// nullsh - interactive shell for a remote torrent daemon.
///
/// With no COMMAND an interactive session starts. Otherwise COMMAND is run
/// once as if it had been typed at the prompt.
#[derive(Debug, Parser)]
#[command(name = "nullsh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides the default location)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Daemon JSON-RPC endpoint
    #[arg(short, long, env = "NULLSH_DAEMON")]
    pub daemon: Option<String>,

    /// Prompt shown before each line
    #[arg(long)]
    pub prompt: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Command line to run once instead of starting a session
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The one-shot line, if any.
    pub fn one_shot(&self) -> Option<String> {
        (!self.command.is_empty()).then(|| self.command.join(" "))
    }
}
