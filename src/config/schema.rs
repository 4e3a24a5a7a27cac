//! Configuration schema definitions for nullsh.
//!
//! These structs map one-to-one onto the YAML config file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Daemon connection settings
    pub daemon: DaemonConfig,

    /// Prompt shown before each line
    pub prompt: String,

    /// History file; `None` keeps history in memory only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries kept
    pub history_size: usize,

    /// When to emit colored output
    pub color: ColorChoice,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            daemon: DaemonConfig::default(),
            prompt: default_prompt(),
            history_file: default_history_file(),
            history_size: 1000,
            color: ColorChoice::Auto,
        }
    }
}

/// How to reach the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// JSON-RPC endpoint
    pub url: String,

    /// Per-flush request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:58846/json".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

fn default_prompt() -> String {
    ">>> ".to_string()
}

fn default_history_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nullsh_history"))
}
