//! Line sources for the shell loop.
//!
//! - [`EditorInput`] uses rustyline with tab completion and history
//! - [`StdinInput`] reads plain lines when no editor is available
//! - [`ScriptedInput`] replays canned lines, for tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::anyhow;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Editor, Helper};

use crate::error::{Result, ShellError};

use super::completion::{word_start, BufferSnapshot, CompletionEngine};
use super::registry::CommandRegistry;

/// Where the shell gets its lines from.
pub trait LineSource {
    /// Read one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Record a line the shell dispatched.
    fn add_history(&mut self, _line: &str) {}
}

/// Canned lines; ends when exhausted.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<std::result::Result<String, String>>,
    history: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|l| Ok(l.into())).collect(),
            history: Vec::new(),
        }
    }

    /// Queue a read failure.
    pub fn push_failure(&mut self, message: &str) {
        self.lines.push_back(Err(message.to_string()));
    }

    /// Queue another line.
    pub fn push_line(&mut self, line: &str) {
        self.lines.push_back(Ok(line.to_string()));
    }

    /// Lines recorded through [`LineSource::add_history`].
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        match self.lines.pop_front() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(message)) => Err(ShellError::Other(anyhow!(message))),
            None => Ok(None),
        }
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

/// Plain lines from standard input.
#[derive(Debug, Default)]
pub struct StdinInput;

impl LineSource for StdinInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        use std::io::Write;

        let mut out = std::io::stdout();
        write!(out, "{}", prompt)?;
        out.flush()?;

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Completion glue between rustyline and [`CompletionEngine`].
pub struct ShellHelper {
    engine: RefCell<CompletionEngine>,
}

impl ShellHelper {
    pub fn new(registry: Rc<CommandRegistry>) -> Self {
        Self {
            engine: RefCell::new(CompletionEngine::new(registry)),
        }
    }
}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let begin = word_start(line, pos);
        let snapshot = BufferSnapshot {
            line,
            begin,
            end: pos,
        };
        let candidates = self
            .engine
            .borrow_mut()
            .candidates(&line[begin..pos], &snapshot);
        Ok((begin, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// rustyline editor with completion and persistent history.
pub struct EditorInput {
    editor: Editor<ShellHelper, DefaultHistory>,
    history_file: Option<PathBuf>,
}

impl EditorInput {
    /// Create the editor and load history from `history_file` if it exists.
    pub fn new(
        registry: Rc<CommandRegistry>,
        history_file: Option<PathBuf>,
        history_size: usize,
    ) -> Result<Self> {
        let config = Config::builder()
            .max_history_size(history_size)
            .map_err(readline_error)?
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .build();

        let mut editor =
            Editor::<ShellHelper, DefaultHistory>::with_config(config).map_err(readline_error)?;
        editor.set_helper(Some(ShellHelper::new(registry)));

        if let Some(path) = history_file.as_ref().filter(|p| p.exists()) {
            if let Err(e) = editor.load_history(path) {
                tracing::warn!("Failed to load history from {}: {}", path.display(), e);
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(readline_error(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::debug!("History entry not recorded: {}", e);
        }
    }
}

impl Drop for EditorInput {
    fn drop(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!("Failed to save history to {}: {}", path.display(), e);
            }
        }
    }
}

fn readline_error(err: ReadlineError) -> ShellError {
    match err {
        ReadlineError::Io(e) => ShellError::Io(e),
        other => ShellError::Other(anyhow!("line editor: {}", other)),
    }
}
