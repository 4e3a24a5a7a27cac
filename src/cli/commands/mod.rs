//! The shell's torrent commands.
//!
//! Every command is listed in [`command_table`]; the registry builds each
//! one once at startup.

pub mod add;
pub mod config;
pub mod display;
pub mod exit;
pub mod info;
pub mod rm;
pub mod state;

use clap::{Arg, ArgAction};

use crate::error::{Result, ShellError};
use crate::rpc::match_torrents;
use crate::shell::{CommandFactory, CommandSpec, Context, Invocation};

/// Static registration table.
pub fn command_table() -> &'static [CommandFactory] {
    static TABLE: &[CommandFactory] = &[
        CommandFactory {
            name: "add",
            build: boxed::<add::AddCommand>,
        },
        CommandFactory {
            name: "config",
            build: boxed::<config::ConfigCommand>,
        },
        CommandFactory {
            name: "exit",
            build: boxed::<exit::ExitCommand>,
        },
        CommandFactory {
            name: "info",
            build: boxed::<info::InfoCommand>,
        },
        CommandFactory {
            name: "pause",
            build: pause,
        },
        CommandFactory {
            name: "resume",
            build: resume,
        },
        CommandFactory {
            name: "rm",
            build: boxed::<rm::RmCommand>,
        },
    ];
    TABLE
}

fn boxed<C: CommandSpec + Default + 'static>() -> Result<Box<dyn CommandSpec>> {
    Ok(Box::new(C::default()))
}

fn pause() -> Result<Box<dyn CommandSpec>> {
    Ok(Box::new(state::StateCommand::pause()))
}

fn resume() -> Result<Box<dyn CommandSpec>> {
    Ok(Box::new(state::StateCommand::resume()))
}

/// The `-a/--all` flag shared by id-taking commands.
pub(crate) fn all_flag() -> Arg {
    Arg::new("all")
        .short('a')
        .long("all")
        .action(ArgAction::SetTrue)
        .help("Apply to every torrent")
}

/// Torrent ids a command should act on.
///
/// `--all` selects every torrent. Otherwise the positional ids are matched
/// against the session; ids the daemon doesn't know are dropped.
pub(crate) fn targets(ctx: &mut Context<'_>, inv: &Invocation) -> Result<Vec<String>> {
    let ids = if inv.flag("all") {
        match_torrents(ctx.daemon, &[])?
    } else if inv.args().is_empty() {
        return Err(ShellError::command("no torrents specified"));
    } else {
        match_torrents(ctx.daemon, inv.args())?
    };

    if ids.is_empty() {
        return Err(ShellError::command("no matching torrents"));
    }
    Ok(ids)
}
