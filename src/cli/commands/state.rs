//! `pause` and `resume`: change the state of torrents.

use serde_json::json;

use crate::error::Result;
use crate::rpc::PendingCall;
use crate::shell::{complete_flags, CommandSpec, Context, Flow, Invocation};

use super::display::plural;
use super::{all_flag, targets};

/// A command that sends the matched ids to one daemon method.
#[derive(Debug, Clone, Copy)]
pub struct StateCommand {
    name: &'static str,
    usage: &'static str,
    about: &'static str,
    /// Progress word, e.g. "Pausing".
    verb: &'static str,
    method: &'static str,
}

impl StateCommand {
    pub fn pause() -> Self {
        Self {
            name: "pause",
            usage: "pause [ID]... [-a|--all]",
            about: "Pause torrents.\n\nPauses each torrent whose id is given, or every torrent with --all.",
            verb: "Pausing",
            method: "core.pause_torrent",
        }
    }

    pub fn resume() -> Self {
        Self {
            name: "resume",
            usage: "resume [ID]... [-a|--all]",
            about: "Resume torrents.\n\nResumes each torrent whose id is given, or every torrent with --all.",
            verb: "Resuming",
            method: "core.resume_torrent",
        }
    }
}

impl CommandSpec for StateCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn usage(&self) -> &str {
        self.usage
    }

    fn about(&self) -> Option<&str> {
        Some(self.about)
    }

    fn options(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(all_flag())
    }

    fn complete(&self, text: &str, _line: &str, _begin: usize, _end: usize) -> Vec<String> {
        complete_flags(self, text)
    }

    fn execute(&self, ctx: &mut Context<'_>, inv: &Invocation) -> Result<Flow> {
        let ids = targets(ctx, inv)?;
        ctx.ui
            .message(&format!("{} {}", self.verb, plural(ids.len(), "torrent")));
        ctx.daemon
            .enqueue(PendingCall::new(self.method, vec![json!(ids)]));
        Ok(Flow::Continue)
    }
}
