//! `rm`: remove torrents from the session.

use clap::{Arg, ArgAction};
use serde_json::json;

use crate::error::Result;
use crate::rpc::PendingCall;
use crate::shell::{complete_flags, CommandSpec, Context, Flow, Invocation};

use super::display::plural;
use super::{all_flag, targets};

#[derive(Debug, Default)]
pub struct RmCommand;

impl CommandSpec for RmCommand {
    fn name(&self) -> &str {
        "rm"
    }

    fn aliases(&self) -> &[&str] {
        &["del"]
    }

    fn usage(&self) -> &str {
        "rm [ID]... [-a|--all] [--remove-data] [-y|--yes]"
    }

    fn about(&self) -> Option<&str> {
        Some(
            "Remove torrents from the session.\n\n\
             Downloaded data is kept unless --remove-data is given.",
        )
    }

    fn options(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(all_flag())
            .arg(
                Arg::new("remove-data")
                    .long("remove-data")
                    .action(ArgAction::SetTrue)
                    .help("Also delete downloaded data"),
            )
            .arg(
                Arg::new("yes")
                    .short('y')
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Do not ask for confirmation"),
            )
    }

    fn complete(&self, text: &str, _line: &str, _begin: usize, _end: usize) -> Vec<String> {
        complete_flags(self, text)
    }

    fn execute(&self, ctx: &mut Context<'_>, inv: &Invocation) -> Result<Flow> {
        let ids = targets(ctx, inv)?;
        let remove_data = inv.flag("remove-data");

        if !inv.flag("yes") {
            let question = if remove_data {
                format!("Remove {} and their data?", plural(ids.len(), "torrent"))
            } else {
                format!("Remove {}?", plural(ids.len(), "torrent"))
            };
            if !ctx.ui.confirm(&question, false)? {
                ctx.ui.message("Aborted.");
                return Ok(Flow::Continue);
            }
        }

        for id in &ids {
            ctx.daemon.enqueue(PendingCall::new(
                "core.remove_torrent",
                vec![json!(id), json!(remove_data)],
            ));
        }
        ctx.ui
            .message(&format!("Removing {}", plural(ids.len(), "torrent")));
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{CallBatcher, MockDaemon};
    use crate::shell::{parse_options, ParseOutcome};
    use crate::ui::MockUI;

    fn run(daemon: &MockDaemon, ui: &mut MockUI, line: &[&str]) -> Result<Flow> {
        let tokens = line.iter().map(|s| s.to_string()).collect();
        let ParseOutcome::Success(inv) = parse_options(&RmCommand, "rm", tokens) else {
            panic!("parse failed");
        };
        let mut ctx = Context { daemon, ui };
        RmCommand.execute(&mut ctx, &inv)
    }

    fn daemon() -> MockDaemon {
        let daemon = MockDaemon::new();
        daemon.respond("core.get_session_state", json!(["a", "b"]));
        daemon
    }

    #[test]
    fn yes_skips_confirmation() {
        let daemon = daemon();
        let mut ui = MockUI::new();
        run(&daemon, &mut ui, &["-y", "a", "b"]).unwrap();
        daemon.flush().unwrap();

        assert!(ui.confirms_shown().is_empty());
        assert_eq!(
            daemon.params_for("core.remove_torrent"),
            vec![vec![json!("a"), json!(false)], vec![json!("b"), json!(false)]]
        );
    }

    #[test]
    fn declined_confirmation_aborts() {
        let daemon = daemon();
        let mut ui = MockUI::new();
        ui.queue_confirm(false);
        run(&daemon, &mut ui, &["a"]).unwrap();

        assert_eq!(ui.confirms_shown(), ["Remove 1 torrent?".to_string()]);
        assert!(ui.has_message("Aborted."));
        assert_eq!(daemon.pending(), 0);
    }

    #[test]
    fn accepted_confirmation_removes_with_data() {
        let daemon = daemon();
        let mut ui = MockUI::new();
        ui.queue_confirm(true);
        run(&daemon, &mut ui, &["--remove-data", "--all"]).unwrap();
        daemon.flush().unwrap();

        assert!(ui.confirms_shown()[0].contains("and their data"));
        assert_eq!(daemon.params_for("core.remove_torrent").len(), 2);
        assert!(ui.has_message("Removing 2 torrents"));
    }

    #[test]
    fn no_ids_is_an_error() {
        let daemon = daemon();
        let mut ui = MockUI::new();
        assert!(run(&daemon, &mut ui, &[]).is_err());
    }
}
