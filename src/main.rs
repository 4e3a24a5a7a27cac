//! nullsh entry point.

use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use nullsh::cli::{command_table, Cli};
use nullsh::config::{load_config, validate, ColorChoice, ConfigOverrides, ShellConfig};
use nullsh::rpc::HttpBatcher;
use nullsh::shell::{CommandRegistry, EditorInput, Shell, StdinInput};
use nullsh::ui::{TerminalUI, UserInterface};
use nullsh::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("nullsh=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nullsh=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Config file, then environment and flags, then validation.
fn load_settings(cli: &Cli) -> Result<ShellConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    ConfigOverrides {
        daemon: cli.daemon.clone(),
        prompt: cli.prompt.clone(),
        no_color: cli.no_color,
    }
    .apply(&mut config);
    validate(&config)?;
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("nullsh starting with args: {:?}", cli);

    let config = match load_settings(&cli) {
        Ok(config) => config,
        Err(e) => {
            let color = if cli.no_color { ColorChoice::Never } else { ColorChoice::Auto };
            TerminalUI::new(color).error(&format!("Error: {}", e));
            return ExitCode::from(2);
        }
    };

    let mut ui = TerminalUI::new(config.color);
    let timeout = Duration::from_secs(config.daemon.timeout_secs);
    let daemon = match HttpBatcher::new(config.daemon.url.clone(), timeout) {
        Ok(daemon) => daemon,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(2);
        }
    };

    let registry = Rc::new(CommandRegistry::discover(command_table()));
    let prompt = ui.theme().format_prompt(&config.prompt);
    let mut shell = Shell::new(Rc::clone(&registry), &daemon, &mut ui).with_prompt(prompt);

    if let Some(line) = cli.one_shot() {
        return if shell.run_once(&line).is_error() {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        };
    }

    match EditorInput::new(registry, config.history_file.clone(), config.history_size) {
        Ok(mut input) => shell.run(&mut input),
        Err(e) => {
            tracing::warn!("Line editor unavailable, reading plain lines: {}", e);
            shell.run(&mut StdinInput);
        }
    }
    ExitCode::SUCCESS
}
