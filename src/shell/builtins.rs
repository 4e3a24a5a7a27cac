//! Commands native to the shell.
//!
//! Currently just `help`.

use crate::error::ShellError;
use crate::ui::UserInterface;

use super::options::render_help;
use super::registry::{Builtin, CommandRegistry, Resolved};

/// Shown by `help` for commands without a description.
pub const NO_HELP: &str = "No help for this command";

const HELP_USAGE: &str = "usage: help [command]";

/// The built-in overlay.
pub fn overlay() -> Vec<Builtin> {
    vec![Builtin {
        name: "help",
        about: "displays this text",
        usage: HELP_USAGE,
        handler: help,
        complete: Some(complete_help),
    }]
}

/// `help [command]`.
pub fn help(registry: &CommandRegistry, args: &[String], ui: &mut dyn UserInterface) {
    match args {
        [] => list_commands(registry, ui),
        [name] => match registry.resolve(name) {
            Some(Resolved::Command(spec)) => {
                ui.message(render_help(spec.as_ref()).trim_end());
            }
            Some(Resolved::Builtin(builtin)) => {
                ui.message(builtin.usage);
                ui.message("");
                ui.message(builtin.about);
            }
            None => {
                ui.error(&format!("unknown command '{}'", name));
                return;
            }
        },
        _ => {
            ui.message(HELP_USAGE);
            return;
        }
    }

    ui.message("");
    ui.message("for help on a specific command, use \"<command> --help\"");
}

fn list_commands(registry: &CommandRegistry, ui: &mut dyn UserInterface) {
    let names = registry.names();
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    for name in names {
        let summary = registry
            .summary(name)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_HELP.to_string());
        ui.help_row(width, name, &summary);
    }
}

fn complete_help(registry: &CommandRegistry, text: &str) -> Vec<String> {
    registry.complete_names(text)
}

/// Error for a name nothing answers to.
pub fn unknown_command(name: &str) -> ShellError {
    ShellError::UnknownCommand {
        name: name.to_string(),
    }
}
