//! Error types for nullsh operations.
//!
//! This module defines [`ShellError`], the error type used throughout the
//! shell, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every variant except configuration errors is contained within a single
//!   loop iteration: the dispatcher formats it and prompts again
//! - Help requests and session termination are not errors; see
//!   [`ParseOutcome`](crate::shell::ParseOutcome) and [`Flow`](crate::shell::Flow)
//! - Use `anyhow::Error` (via `ShellError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nullsh operations.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The first token matched neither a built-in nor a registered command.
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    /// Malformed flags or arguments for a command.
    #[error("{message}")]
    OptionParse { message: String },

    /// A command failed while executing.
    #[error("{message}")]
    CommandFailed { message: String },

    /// A name or alias was already taken when a command registered.
    #[error("name '{name}' is already registered by '{owner}'")]
    DuplicateCommand { name: String, owner: String },

    /// A registration table entry failed to build its command.
    #[error("failed to load command '{name}': {message}")]
    CommandLoad { name: String, message: String },

    /// The daemon answered a call with an error, or its callback failed.
    #[error("{method}: {message}")]
    Rpc { method: String, message: String },

    /// The daemon could not be reached.
    #[error("daemon unreachable: {message}")]
    Transport { message: String },

    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Shorthand for a [`ShellError::CommandFailed`].
    pub fn command(message: impl Into<String>) -> Self {
        Self::CommandFailed {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ShellError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Result type alias for nullsh operations.
pub type Result<T> = std::result::Result<T, ShellError>;
