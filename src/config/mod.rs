//! Shell configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading, overrides and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use nullsh::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "daemon:\n  url: http://seedbox:58846/json\n").unwrap();
//!
//! let config = load_config(Some(&path)).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.daemon.url, "http://seedbox:58846/json");
//! ```
//!
//! # Precedence
//!
//! 1. Built-in defaults
//! 2. Config file (`--config PATH`, else `<config dir>/nullsh/config.yml`)
//! 3. Environment (`NULLSH_DAEMON`) and command-line flags

pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, load_config, load_config_file, parse_config, validate, ConfigOverrides,
};
pub use schema::{ColorChoice, DaemonConfig, ShellConfig};
