//! Visual theme and styling.

use console::Style;

use crate::config::ColorChoice;

/// The shell's visual theme.
#[derive(Debug, Clone)]
pub struct ShellTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for the input prompt (magenta bold).
    pub prompt: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for command names in help listings (bold).
    pub key: Style,
}

impl Default for ShellTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            prompt: Style::new().magenta().bold(),
            dim: Style::new().dim(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            prompt: Style::new(),
            dim: Style::new(),
            key: Style::new(),
        }
    }

    /// Pick the theme for a color setting.
    pub fn for_choice(choice: ColorChoice) -> Self {
        if should_use_colors(choice) {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format the input prompt.
    pub fn format_prompt(&self, prompt: &str) -> String {
        format!("{}", self.prompt.apply_to(prompt))
    }

    /// Format one row of the `help` listing, padding the name to `width`.
    pub fn format_help_row(&self, width: usize, name: &str, description: &str) -> String {
        let padded = format!("{:width$}", name, width = width);
        format!(
            "{}  {}",
            self.key.apply_to(padded),
            self.dim.apply_to(description)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            // Check NO_COLOR env var (https://no-color.org/)
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            console::Term::stdout().is_term()
        }
    }
}
