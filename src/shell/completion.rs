//! Tab completion.
//!
//! The engine follows the readline contract: it is queried with the word
//! under the cursor and a state index 0, 1, 2... and answers one candidate
//! per call until it returns `None`. Candidates are computed on state 0 and
//! served from a cache for the rest of the cycle.

use std::rc::Rc;

use super::command::CommandSpec;
use super::options::build_parser;
use super::registry::CommandRegistry;

/// The edit buffer as seen when completion was requested.
#[derive(Debug, Clone, Copy)]
pub struct BufferSnapshot<'a> {
    /// Whole line.
    pub line: &'a str,
    /// Byte offset where the word being completed starts.
    pub begin: usize,
    /// Byte offset of the cursor.
    pub end: usize,
}

/// Per-cycle state. Rebuilt on state 0.
#[derive(Debug, Clone, Default)]
pub struct CompletionState {
    pub original_line: String,
    pub stripped_line: String,
    pub leading_whitespace: usize,
    /// Offsets relative to `stripped_line`.
    pub begin: usize,
    pub end: usize,
    pub candidates: Vec<String>,
}

/// Completion driven by the command registry.
pub struct CompletionEngine {
    registry: Rc<CommandRegistry>,
    state: Option<CompletionState>,
}

impl CompletionEngine {
    pub fn new(registry: Rc<CommandRegistry>) -> Self {
        Self {
            registry,
            state: None,
        }
    }

    /// Answer the `state`-th candidate for `text`.
    pub fn complete(&mut self, text: &str, state: usize, buffer: &BufferSnapshot<'_>) -> Option<String> {
        if state == 0 {
            self.state = Some(self.rebuild(text, buffer));
        }
        self.state.as_ref()?.candidates.get(state).cloned()
    }

    /// State of the current cycle, if one has started.
    pub fn state(&self) -> Option<&CompletionState> {
        self.state.as_ref()
    }

    /// Run a full cycle and collect every candidate.
    pub fn candidates(&mut self, text: &str, buffer: &BufferSnapshot<'_>) -> Vec<String> {
        let mut all = Vec::new();
        let mut state = 0;
        while let Some(candidate) = self.complete(text, state, buffer) {
            all.push(candidate);
            state += 1;
        }
        all
    }

    fn rebuild(&self, text: &str, buffer: &BufferSnapshot<'_>) -> CompletionState {
        let stripped = buffer.line.trim_start();
        let leading = buffer.line.len() - stripped.len();
        let begin = buffer.begin.saturating_sub(leading);
        let end = buffer.end.saturating_sub(leading);

        let candidates = if begin == 0 {
            self.registry.complete_names(text)
        } else {
            self.delegate(text, stripped, begin, end)
        };

        tracing::debug!(
            "Completion for '{}' at {}..{}: {} candidate(s)",
            text,
            begin,
            end,
            candidates.len()
        );

        CompletionState {
            original_line: buffer.line.to_string(),
            stripped_line: stripped.to_string(),
            leading_whitespace: leading,
            begin,
            end,
            candidates,
        }
    }

    fn delegate(&self, text: &str, stripped: &str, begin: usize, end: usize) -> Vec<String> {
        let Some(first) = stripped.split_whitespace().next() else {
            return Vec::new();
        };

        if let Some(builtin) = self.registry.builtin(first) {
            return builtin
                .complete
                .map(|complete| complete(&self.registry, text))
                .unwrap_or_default();
        }

        match self.registry.command(first) {
            Some(spec) => spec.complete(text, stripped, begin, end),
            None => Vec::new(),
        }
    }
}

/// Long flags of `spec` starting with `text`, e.g. `--verbose`.
pub fn complete_flags(spec: &dyn CommandSpec, text: &str) -> Vec<String> {
    let parser = build_parser(spec);
    let mut flags: Vec<String> = parser
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .map(|long| format!("--{}", long))
        .chain(std::iter::once("--help".to_string()))
        .filter(|flag| flag.starts_with(text))
        .collect();
    flags.sort();
    flags.dedup();
    flags
}

/// Start of the word ending at `pos`.
pub fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0)
}
