//! `info`: show torrent status.

use std::collections::HashMap;

use clap::{Arg, ArgAction};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, ShellError};
use crate::rpc::{fetch, match_torrents};
use crate::shell::{complete_flags, CommandSpec, Context, Flow, Invocation};
use crate::ui::Table;

use super::display::{format_progress, format_ratio, format_size, format_speed};

/// Status keys requested from the daemon.
const STATUS_KEYS: &[&str] = &[
    "name",
    "state",
    "progress",
    "total_size",
    "download_payload_rate",
    "upload_payload_rate",
    "num_peers",
    "num_seeds",
    "ratio",
];

/// One torrent's status as reported by `core.get_torrents_status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TorrentStatus {
    pub name: String,
    pub state: String,
    pub progress: f64,
    pub total_size: u64,
    pub download_payload_rate: f64,
    pub upload_payload_rate: f64,
    pub num_peers: u32,
    pub num_seeds: u32,
    pub ratio: f64,
}

#[derive(Debug, Default)]
pub struct InfoCommand;

impl InfoCommand {
    fn table(&self, verbose: bool) -> Table {
        if verbose {
            Table::new(&[
                "ID", "Name", "State", "Progress", "Size", "Down", "Up", "Peers", "Ratio",
            ])
        } else {
            Table::new(&["ID", "Name", "State", "Progress"])
        }
    }

    fn row(&self, id: &str, status: &TorrentStatus, verbose: bool) -> Vec<String> {
        let mut row = vec![
            id.to_string(),
            status.name.clone(),
            status.state.clone(),
            format_progress(status.progress),
        ];
        if verbose {
            row.extend([
                format_size(status.total_size),
                format_speed(status.download_payload_rate),
                format_speed(status.upload_payload_rate),
                format!("{} ({})", status.num_peers, status.num_seeds),
                format_ratio(status.ratio),
            ]);
        }
        row
    }
}

impl CommandSpec for InfoCommand {
    fn name(&self) -> &str {
        "info"
    }

    fn usage(&self) -> &str {
        "info [ID]... [-v|--verbose]"
    }

    fn about(&self) -> Option<&str> {
        Some("Show information about torrents.\n\nWith no ids, every torrent in the session is shown.")
    }

    fn options(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Show sizes, transfer rates, peers and ratio"),
        )
    }

    fn complete(&self, text: &str, _line: &str, _begin: usize, _end: usize) -> Vec<String> {
        complete_flags(self, text)
    }

    fn execute(&self, ctx: &mut Context<'_>, inv: &Invocation) -> Result<Flow> {
        let ids = match_torrents(ctx.daemon, inv.args())?;
        if ids.is_empty() {
            if !inv.args().is_empty() {
                return Err(ShellError::command("no matching torrents"));
            }
            ctx.ui.message("No torrents.");
            return Ok(Flow::Continue);
        }

        let statuses: HashMap<String, TorrentStatus> = fetch(
            ctx.daemon,
            "core.get_torrents_status",
            vec![json!({ "id": ids }), json!(STATUS_KEYS)],
        )?;

        let verbose = inv.flag("verbose");
        let mut table = self.table(verbose);
        for id in &ids {
            match statuses.get(id) {
                Some(status) => table.add_row(self.row(id, status, verbose)),
                None => tracing::debug!("No status returned for {}", id),
            }
        }
        ctx.ui.table(&table);
        Ok(Flow::Continue)
    }
}
