//! Configuration file discovery, loading and validation.

use crate::config::schema::{ColorChoice, ShellConfig};
use crate::error::{Result, ShellError};
use std::fs;
use std::path::{Path, PathBuf};

/// Values from the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Daemon URL (`--daemon` / `NULLSH_DAEMON`)
    pub daemon: Option<String>,
    /// Prompt text (`--prompt`)
    pub prompt: Option<String>,
    /// Disable colors (`--no-color`)
    pub no_color: bool,
}

impl ConfigOverrides {
    /// Apply the overrides on top of a loaded config.
    pub fn apply(&self, config: &mut ShellConfig) {
        if let Some(url) = &self.daemon {
            config.daemon.url = url.clone();
        }
        if let Some(prompt) = &self.prompt {
            config.prompt = prompt.clone();
        }
        if self.no_color {
            config.color = ColorChoice::Never;
        }
    }
}

/// Location of the user's config file, whether or not it exists.
///
/// `<config dir>/nullsh/config.yml`, e.g. `~/.config/nullsh/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nullsh").join("config.yml"))
}

/// Load the effective configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ShellConfig> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)?
            }
            None => ShellConfig::default(),
        },
    };
    Ok(config)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ShellConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShellError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShellError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ShellConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ShellConfig> {
    if content.trim().is_empty() {
        return Ok(ShellConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ShellError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Check values serde cannot check.
pub fn validate(config: &ShellConfig) -> Result<()> {
    let url = config.daemon.url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ShellError::ConfigValidationError {
            message: format!("daemon url must be http:// or https://, got '{}'", url),
        });
    }
    if config.daemon.timeout_secs == 0 {
        return Err(ShellError::ConfigValidationError {
            message: "daemon timeout_secs must be greater than zero".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ShellError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "prompt: 'deluge> '\nhistory_size: 10\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.prompt, "deluge> ");
        assert_eq!(config.history_size, 10);
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "daemon: [unclosed").unwrap();

        let err = load_config_file(&path).unwrap_err();
        match err {
            ShellError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse_config("\n", Path::new("config.yml")).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = ShellConfig::default();
        let overrides = ConfigOverrides {
            daemon: Some("http://box:1234/json".into()),
            prompt: Some("$ ".into()),
            no_color: true,
        };
        overrides.apply(&mut config);
        assert_eq!(config.daemon.url, "http://box:1234/json");
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.color, ColorChoice::Never);
    }

    #[test]
    fn empty_overrides_change_nothing() {
        let mut config = ShellConfig::default();
        ConfigOverrides::default().apply(&mut config);
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(validate(&ShellConfig::default()).is_ok());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let mut config = ShellConfig::default();
        config.daemon.url = "tcp://localhost:58846".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("tcp://localhost:58846"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = ShellConfig::default();
        config.daemon.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }
}
