//! Per-command option parsing that never exits the process.
//!
//! clap normally prints help or an error and calls `exit`. Inside the
//! shell both become values of [`ParseOutcome`] and the dispatcher decides
//! what to print.

use clap::error::ErrorKind;
use clap::{Arg, ArgAction};

use super::command::{CommandSpec, Invocation};

/// Id of the trailing positional collector.
pub const ARGS_ID: &str = "args";

/// Result of parsing one command's arguments.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Arguments parsed; run the command.
    Success(Invocation),
    /// `--help` was given; carries the rendered help. Not an error.
    HelpRequested(String),
    /// Malformed arguments; carries a one-line message.
    ParseError(String),
}

/// Build the clap parser for a command.
pub fn build_parser(spec: &dyn CommandSpec) -> clap::Command {
    let mut cmd = clap::Command::new(spec.name().to_string())
        .no_binary_name(true)
        .disable_version_flag(true)
        .override_usage(spec.usage().to_string());
    if let Some(about) = spec.about() {
        cmd = cmd.about(about.to_string());
    }

    spec.options(cmd).arg(
        Arg::new(ARGS_ID)
            .value_name("ARGS")
            .num_args(0..)
            .action(ArgAction::Append),
    )
}

/// Full help text for a command, as printed by `<command> --help`.
pub fn render_help(spec: &dyn CommandSpec) -> String {
    build_parser(spec).render_help().to_string()
}

/// Parse tokens for `spec`, invoked as `invoked_as`.
pub fn parse_options(spec: &dyn CommandSpec, invoked_as: &str, tokens: Vec<String>) -> ParseOutcome {
    match build_parser(spec).try_get_matches_from(tokens) {
        Ok(matches) => {
            let args = matches
                .get_many::<String>(ARGS_ID)
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            ParseOutcome::Success(Invocation::new(invoked_as, args, matches))
        }
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                ParseOutcome::HelpRequested(err.render().to_string())
            }
            _ => ParseOutcome::ParseError(first_line(&err.render().to_string())),
        },
    }
}

/// Reduce clap's multi-line error report to its headline.
fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default().trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
