//! `add`: add torrents from files, URLs or magnet links.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Arg, ArgAction};
use serde_json::{json, Map, Value};

use crate::error::{Result, ShellError};
use crate::rpc::PendingCall;
use crate::shell::{complete_flags, CommandSpec, Context, Flow, Invocation};

/// What the daemon answered for each source, in order.
type Added = Rc<RefCell<Vec<(String, Option<String>)>>>;

#[derive(Debug, Default)]
pub struct AddCommand;

impl AddCommand {
    fn add_options(&self, inv: &Invocation) -> Value {
        let mut options = Map::new();
        if let Some(path) = inv.value("path") {
            options.insert("download_location".to_string(), json!(path));
        }
        if inv.flag("paused") {
            options.insert("add_paused".to_string(), json!(true));
        }
        Value::Object(options)
    }

    fn call_for(&self, source: &str, options: &Value) -> Result<PendingCall> {
        if source.starts_with("magnet:") {
            return Ok(PendingCall::new(
                "core.add_torrent_magnet",
                vec![json!(source), options.clone()],
            ));
        }
        if source.starts_with("http://") || source.starts_with("https://") {
            return Ok(PendingCall::new(
                "core.add_torrent_url",
                vec![json!(source), options.clone(), json!({})],
            ));
        }

        let path = Path::new(source);
        let contents = std::fs::read(path).map_err(|e| {
            ShellError::command(format!("cannot read {}: {}", path.display(), e))
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string());

        Ok(PendingCall::new(
            "core.add_torrent_file",
            vec![json!(filename), json!(STANDARD.encode(contents)), options.clone()],
        ))
    }
}

impl CommandSpec for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn usage(&self) -> &str {
        "add <torrent-file|URL|magnet>... [-p|--path DIR] [--paused]"
    }

    fn about(&self) -> Option<&str> {
        Some("Add torrents.\n\nSources may be local .torrent files, http(s) URLs or magnet links.")
    }

    fn options(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .help("Download location on the daemon host"),
        )
        .arg(
            Arg::new("paused")
                .long("paused")
                .action(ArgAction::SetTrue)
                .help("Add in the paused state"),
        )
    }

    fn complete(&self, text: &str, _line: &str, _begin: usize, _end: usize) -> Vec<String> {
        if text.starts_with('-') {
            return complete_flags(self, text);
        }
        complete_paths(text)
    }

    fn execute(&self, ctx: &mut Context<'_>, inv: &Invocation) -> Result<Flow> {
        if inv.args().is_empty() {
            return Err(ShellError::command("no torrents specified"));
        }

        let options = self.add_options(inv);
        let added: Added = Rc::new(RefCell::new(Vec::new()));
        let mut unreadable = None;

        for source in inv.args() {
            let call = match self.call_for(source, &options) {
                Ok(call) => call,
                Err(err) => {
                    // Later sources are still added; the first failure is the result.
                    if unreadable.is_none() {
                        unreadable = Some(err);
                    } else {
                        ctx.ui.error(&err.to_string());
                    }
                    continue;
                }
            };
            let sink = Rc::clone(&added);
            let source = source.clone();
            ctx.daemon.enqueue(call.on_reply(move |value| {
                sink.borrow_mut()
                    .push((source, value.as_str().map(String::from)));
                Ok(())
            }));
        }

        let flushed = ctx.daemon.flush();
        for (source, id) in added.take() {
            match id {
                Some(id) => ctx.ui.success(&format!("Added {} ({})", source, id)),
                None => ctx.ui.warning(&format!("{} was not added", source)),
            }
        }
        flushed?;
        match unreadable {
            Some(err) => Err(err),
            None => Ok(Flow::Continue),
        }
    }
}

/// Local paths starting with `text`. Directories end with `/`.
fn complete_paths(text: &str) -> Vec<String> {
    let (dir, prefix) = match text.rfind('/') {
        Some(i) => (&text[..=i], &text[i + 1..]),
        None => ("", text),
    };
    let search = if dir.is_empty() { Path::new(".") } else { Path::new(dir) };

    let Ok(entries) = std::fs::read_dir(search) else {
        return Vec::new();
    };

    let mut candidates: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some(format!("{}{}{}", dir, name, if is_dir { "/" } else { "" }))
        })
        .collect();
    candidates.sort();
    candidates
}
