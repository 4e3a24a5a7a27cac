//! `config`: show or change daemon configuration.

use std::collections::BTreeMap;

use clap::Arg;
use serde_json::{json, Value};

use crate::error::{Result, ShellError};
use crate::rpc::{fetch, PendingCall};
use crate::shell::{complete_flags, CommandSpec, Context, Flow, Invocation};

/// Keys offered by completion. The daemon may know more.
const KNOWN_KEYS: &[&str] = &[
    "add_paused",
    "allow_remote",
    "daemon_port",
    "dht",
    "download_location",
    "listen_ports",
    "max_active_downloading",
    "max_active_limit",
    "max_active_seeding",
    "max_connections_global",
    "max_download_speed",
    "max_upload_slots_global",
    "max_upload_speed",
    "move_completed",
    "move_completed_path",
    "natpmp",
    "prioritize_first_last_pieces",
    "queue_new_to_top",
    "stop_seed_at_ratio",
    "stop_seed_ratio",
    "upnp",
];

#[derive(Debug, Default)]
pub struct ConfigCommand;

impl ConfigCommand {
    fn show(&self, ctx: &mut Context<'_>, keys: &[String]) -> Result<()> {
        let config: BTreeMap<String, Value> = fetch(ctx.daemon, "core.get_config", Vec::new())?;

        if keys.is_empty() {
            for (key, value) in &config {
                ctx.ui.message(&format!("{}: {}", key, value));
            }
            return Ok(());
        }

        for key in keys {
            match config.get(key) {
                Some(value) => ctx.ui.message(&format!("{}: {}", key, value)),
                None => ctx.ui.warning(&format!("unknown config key: {}", key)),
            }
        }
        Ok(())
    }

    fn set(&self, ctx: &mut Context<'_>, key: &str, raw: &str) {
        let value = parse_value(raw);
        ctx.ui.message(&format!("Setting {} to {}", key, value));
        ctx.daemon.enqueue(PendingCall::new(
            "core.set_config",
            vec![json!({ key: value })],
        ));
    }
}

impl CommandSpec for ConfigCommand {
    fn name(&self) -> &str {
        "config"
    }

    fn usage(&self) -> &str {
        "config [KEY]... [-s|--set KEY VALUE]"
    }

    fn about(&self) -> Option<&str> {
        Some(
            "Show and set daemon configuration.\n\n\
             VALUE is read as JSON where possible, otherwise as a string.",
        )
    }

    fn options(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("set")
                .short('s')
                .long("set")
                .num_args(2)
                .value_names(["KEY", "VALUE"])
                .help("Set KEY to VALUE"),
        )
    }

    fn complete(&self, text: &str, _line: &str, _begin: usize, _end: usize) -> Vec<String> {
        if text.starts_with('-') {
            return complete_flags(self, text);
        }
        KNOWN_KEYS
            .iter()
            .filter(|key| key.starts_with(text))
            .map(|key| key.to_string())
            .collect()
    }

    fn execute(&self, ctx: &mut Context<'_>, inv: &Invocation) -> Result<Flow> {
        match inv.values("set").as_slice() {
            [] => self.show(ctx, inv.args())?,
            [key, value] => {
                if !inv.args().is_empty() {
                    return Err(ShellError::command("--set does not take extra keys"));
                }
                self.set(ctx, key, value);
            }
            _ => return Err(ShellError::command("--set needs KEY and VALUE")),
        }
        Ok(Flow::Continue)
    }
}

/// Read `raw` as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{CallBatcher, MockDaemon};
    use crate::shell::{parse_options, ParseOutcome};
    use crate::ui::MockUI;

    fn run(daemon: &MockDaemon, ui: &mut MockUI, line: &[&str]) -> Result<Flow> {
        let tokens = line.iter().map(|s| s.to_string()).collect();
        let ParseOutcome::Success(inv) = parse_options(&ConfigCommand, "config", tokens) else {
            panic!("parse failed");
        };
        let mut ctx = Context { daemon, ui };
        ConfigCommand.execute(&mut ctx, &inv)
    }

    fn daemon() -> MockDaemon {
        let daemon = MockDaemon::new();
        daemon.respond(
            "core.get_config",
            json!({"max_upload_speed": -1.0, "dht": true, "download_location": "/srv"}),
        );
        daemon
    }

    #[test]
    fn shows_all_keys_sorted() {
        let daemon = daemon();
        let mut ui = MockUI::new();
        run(&daemon, &mut ui, &[]).unwrap();

        assert_eq!(
            ui.messages(),
            vec!["dht: true", "download_location: \"/srv\"", "max_upload_speed: -1.0"]
        );
    }

    #[test]
    fn shows_requested_keys_and_warns_on_unknown() {
        let daemon = daemon();
        let mut ui = MockUI::new();
        run(&daemon, &mut ui, &["dht", "nope"]).unwrap();

        assert_eq!(ui.messages(), vec!["dht: true"]);
        assert!(ui.has_warning("unknown config key: nope"));
    }

    #[test]
    fn set_parses_json_values() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        run(&daemon, &mut ui, &["--set", "max_upload_speed", "50"]).unwrap();
        daemon.flush().unwrap();

        assert_eq!(
            daemon.params_for("core.set_config"),
            vec![vec![json!({"max_upload_speed": 50})]]
        );
    }

    #[test]
    fn set_falls_back_to_string() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        run(&daemon, &mut ui, &["-s", "download_location", "/data/dl"]).unwrap();
        daemon.flush().unwrap();

        assert_eq!(
            daemon.params_for("core.set_config"),
            vec![vec![json!({"download_location": "/data/dl"})]]
        );
    }

    #[test]
    fn set_with_extra_keys_is_refused() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        assert!(run(&daemon, &mut ui, &["dht", "-s", "upnp", "true"]).is_err());
        assert_eq!(daemon.pending(), 0);
    }

    #[test]
    fn completes_keys() {
        assert_eq!(
            ConfigCommand.complete("max_up", "config max_up", 7, 13),
            vec!["max_upload_slots_global", "max_upload_speed"]
        );
    }

    #[test]
    fn parse_value_variants() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_value("hello"), json!("hello"));
    }
}
