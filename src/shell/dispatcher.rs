//! The read-dispatch-flush loop.

use std::rc::Rc;

use crate::error::ShellError;
use crate::rpc::CallBatcher;
use crate::ui::UserInterface;

use super::builtins::unknown_command;
use super::command::{split_words, CommandSpec, Context, Flow};
use super::input::LineSource;
use super::options::{parse_options, ParseOutcome};
use super::registry::{CommandRegistry, Resolved};

/// Consecutive read failures after which the loop gives up.
const MAX_READ_FAILURES: usize = 16;

/// Default prompt.
pub const DEFAULT_PROMPT: &str = ">>> ";

/// How one line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line; nothing ran.
    Empty,
    /// No command by that name.
    Unknown,
    /// `--help` was printed instead of running the command.
    Help,
    /// Arguments could not be tokenized or parsed.
    Rejected,
    /// A built-in or command ran to completion.
    Completed,
    /// The command, or the flush after it, failed.
    Failed,
    /// The command ended the session.
    Exit,
}

impl Outcome {
    /// Whether the line reported an error.
    pub fn is_error(self) -> bool {
        matches!(self, Outcome::Unknown | Outcome::Rejected | Outcome::Failed)
    }

    fn needs_flush(self) -> bool {
        matches!(self, Outcome::Completed | Outcome::Failed | Outcome::Exit)
    }
}

/// The interactive shell.
pub struct Shell<'a> {
    registry: Rc<CommandRegistry>,
    daemon: &'a dyn CallBatcher,
    ui: &'a mut dyn UserInterface,
    prompt: String,
}

impl<'a> Shell<'a> {
    pub fn new(
        registry: Rc<CommandRegistry>,
        daemon: &'a dyn CallBatcher,
        ui: &'a mut dyn UserInterface,
    ) -> Self {
        Self {
            registry,
            daemon,
            ui,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Use a different prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn registry(&self) -> &Rc<CommandRegistry> {
        &self.registry
    }

    /// Resolve, parse and execute one line. Does not flush.
    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Empty;
        }

        let (name, rest) = split_command(line);
        tracing::debug!("Dispatching '{}' with '{}'", name, rest);

        let registry = Rc::clone(&self.registry);
        match registry.resolve(name) {
            None => {
                self.report(&unknown_command(name));
                Outcome::Unknown
            }
            Some(Resolved::Builtin(builtin)) => match split_words(rest) {
                Ok(args) => {
                    (builtin.handler)(&registry, &args, &mut *self.ui);
                    Outcome::Completed
                }
                Err(err) => {
                    self.report(&err);
                    Outcome::Rejected
                }
            },
            Some(Resolved::Command(spec)) => self.execute(spec.as_ref(), name, rest),
        }
    }

    fn execute(&mut self, spec: &dyn CommandSpec, name: &str, rest: &str) -> Outcome {
        let tokens = match spec.split(rest) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.report(&err);
                return Outcome::Rejected;
            }
        };

        let invocation = match parse_options(spec, name, tokens) {
            ParseOutcome::Success(invocation) => invocation,
            ParseOutcome::HelpRequested(help) => {
                self.ui.message(help.trim_end());
                return Outcome::Help;
            }
            ParseOutcome::ParseError(message) => {
                self.report(&ShellError::OptionParse { message });
                return Outcome::Rejected;
            }
        };

        let mut ctx = Context {
            daemon: self.daemon,
            ui: &mut *self.ui,
        };
        match spec.execute(&mut ctx, &invocation) {
            Ok(Flow::Continue) => Outcome::Completed,
            Ok(Flow::Exit) => Outcome::Exit,
            Err(err) => {
                self.report(&err);
                Outcome::Failed
            }
        }
    }

    /// Flush queued calls. Returns `false` if the flush failed.
    pub fn flush(&mut self) -> bool {
        let pending = self.daemon.pending();
        let spinner = (pending > 0 && self.ui.is_interactive())
            .then(|| self.ui.start_spinner("Waiting for daemon..."));

        tracing::debug!("Flushing {} call(s)", pending);
        let result = self.daemon.flush();

        if let Some(mut spinner) = spinner {
            spinner.finish();
        }

        match result {
            Ok(()) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// Dispatch one line and flush if anything ran.
    pub fn run_once(&mut self, line: &str) -> Outcome {
        let outcome = self.dispatch(line);
        if outcome.needs_flush() && !self.flush() && outcome != Outcome::Exit {
            return Outcome::Failed;
        }
        outcome
    }

    /// Read and run lines until end of input or a command ends the session.
    pub fn run(&mut self, input: &mut dyn LineSource) {
        let mut failures = 0;

        loop {
            match input.read_line(&self.prompt) {
                Ok(None) => break,
                Ok(Some(line)) => {
                    failures = 0;
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        input.add_history(trimmed);
                    }
                    if self.run_once(&line) == Outcome::Exit {
                        break;
                    }
                }
                Err(err) => {
                    failures += 1;
                    self.report(&err);
                    if failures >= MAX_READ_FAILURES {
                        tracing::warn!("Giving up after {} failed reads", failures);
                        break;
                    }
                }
            }
        }

        self.ui.message("");
    }

    fn report(&mut self, err: &ShellError) {
        tracing::debug!("Reporting error: {:?}", err);
        self.ui.error(&err.to_string());
    }
}

/// Split a trimmed line into the command name and the rest.
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::rpc::{MockDaemon, PendingCall};
    use crate::shell::{CommandFactory, Invocation, ScriptedInput};
    use crate::ui::MockUI;
    use clap::{Arg, ArgAction};
    use serde_json::json;

    struct Pause;

    impl CommandSpec for Pause {
        fn name(&self) -> &str {
            "pause"
        }
        fn aliases(&self) -> &[&str] {
            &["stop"]
        }
        fn usage(&self) -> &str {
            "pause [ID]... [--all]"
        }
        fn about(&self) -> Option<&str> {
            Some("Pause torrents.")
        }
        fn options(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(Arg::new("all").short('a').long("all").action(ArgAction::SetTrue))
        }
        fn execute(&self, ctx: &mut Context<'_>, inv: &Invocation) -> Result<Flow> {
            if inv.args().is_empty() && !inv.flag("all") {
                return Err(ShellError::command("no torrents specified"));
            }
            ctx.daemon.enqueue(PendingCall::new(
                "core.pause_torrent",
                vec![json!(inv.args())],
            ));
            ctx.ui.success(&format!("{} via {}", inv.args().join(","), inv.command()));
            Ok(Flow::Continue)
        }
    }

    struct Quit;

    impl CommandSpec for Quit {
        fn name(&self) -> &str {
            "exit"
        }
        fn usage(&self) -> &str {
            "exit"
        }
        fn execute(&self, _ctx: &mut Context<'_>, _inv: &Invocation) -> Result<Flow> {
            Ok(Flow::Exit)
        }
    }

    fn build_pause() -> Result<Box<dyn CommandSpec>> {
        Ok(Box::new(Pause))
    }

    fn build_quit() -> Result<Box<dyn CommandSpec>> {
        Ok(Box::new(Quit))
    }

    fn registry() -> Rc<CommandRegistry> {
        Rc::new(CommandRegistry::discover(&[
            CommandFactory {
                name: "pause",
                build: build_pause,
            },
            CommandFactory {
                name: "exit",
                build: build_quit,
            },
        ]))
    }

    #[test]
    fn empty_line_prints_nothing_and_does_not_flush() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let mut shell = Shell::new(registry(), &daemon, &mut ui);

        assert_eq!(shell.run_once("   "), Outcome::Empty);
        assert_eq!(daemon.flush_count(), 0);
        assert!(ui.transcript().is_empty());
    }

    #[test]
    fn unknown_command_is_reported_without_flush() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("frobnicate now");

        assert_eq!(outcome, Outcome::Unknown);
        assert!(outcome.is_error());
        assert_eq!(ui.errors(), vec!["unknown command: frobnicate"]);
        assert_eq!(daemon.flush_count(), 0);
    }

    #[test]
    fn command_runs_then_flushes_once() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("pause a b");

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(daemon.flush_count(), 1);
        assert_eq!(daemon.params_for("core.pause_torrent"), vec![vec![json!(["a", "b"])]]);
        assert!(ui.has_success("a,b via pause"));
    }

    #[test]
    fn alias_reports_the_typed_name() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        Shell::new(registry(), &daemon, &mut ui).run_once("stop a");
        assert!(ui.has_success("a via stop"));
    }

    #[test]
    fn help_flag_prints_help_and_skips_execute_and_flush() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("pause --help");

        assert_eq!(outcome, Outcome::Help);
        assert!(!outcome.is_error());
        assert!(ui.has_message("pause [ID]... [--all]"));
        assert!(ui.successes().is_empty());
        assert_eq!(daemon.flush_count(), 0);
    }

    #[test]
    fn parse_error_is_reported() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("pause --bogus");

        assert_eq!(outcome, Outcome::Rejected);
        assert!(ui.has_error("--bogus"));
        assert_eq!(daemon.flush_count(), 0);
    }

    #[test]
    fn unbalanced_quote_is_rejected() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("pause \"a");
        assert_eq!(outcome, Outcome::Rejected);
        assert!(ui.has_error("No closing quotation"));
    }

    #[test]
    fn failing_command_still_flushes() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("pause");

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(ui.errors(), vec!["no torrents specified"]);
        assert_eq!(daemon.flush_count(), 1);
    }

    #[test]
    fn flush_failure_is_reported_as_failure() {
        let daemon = MockDaemon::new();
        daemon.fail("core.pause_torrent", "no such torrent");
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("pause zz");

        assert_eq!(outcome, Outcome::Failed);
        assert!(ui.has_error("core.pause_torrent: no such torrent"));
    }

    #[test]
    fn builtin_runs_and_flushes() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let outcome = Shell::new(registry(), &daemon, &mut ui).run_once("help");

        assert_eq!(outcome, Outcome::Completed);
        assert!(ui.has_message("Pause torrents."));
        assert_eq!(daemon.flush_count(), 1);
    }

    #[test]
    fn spinner_only_when_interactive_and_pending() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        ui.set_interactive(true);
        {
            let mut shell = Shell::new(registry(), &daemon, &mut ui);
            shell.run_once("help");
            shell.run_once("pause a");
        }
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn loop_survives_errors_and_stops_on_exit() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let mut input = ScriptedInput::new(["bogus", "pause", "pause a", "exit", "pause b"]);

        Shell::new(registry(), &daemon, &mut ui).run(&mut input);

        assert!(ui.has_error("unknown command: bogus"));
        assert!(ui.has_success("a via pause"));
        assert!(!ui.has_success("b via pause"));
        assert_eq!(ui.messages().last().map(String::as_str), Some(""));
        assert_eq!(input.history(), ["bogus", "pause", "pause a", "exit"]);
    }

    #[test]
    fn loop_ends_at_end_of_input() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let mut input = ScriptedInput::new(["", "pause a"]);
        Shell::new(registry(), &daemon, &mut ui).run(&mut input);

        assert_eq!(daemon.flush_count(), 1);
        assert_eq!(ui.messages(), vec![""]);
    }

    #[test]
    fn read_failures_are_reported_and_loop_continues() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let mut input = ScriptedInput::default();
        input.push_failure("interrupted system call");
        input.push_line("pause a");

        Shell::new(registry(), &daemon, &mut ui).run(&mut input);

        assert!(ui.has_error("interrupted system call"));
        assert!(ui.has_success("a via pause"));
    }

    #[test]
    fn persistent_read_failures_end_the_loop() {
        let daemon = MockDaemon::new();
        let mut ui = MockUI::new();
        let mut input = ScriptedInput::default();
        for _ in 0..MAX_READ_FAILURES + 3 {
            input.push_failure("dead tty");
        }
        input.push_line("pause a");

        Shell::new(registry(), &daemon, &mut ui).run(&mut input);

        assert_eq!(ui.errors().len(), MAX_READ_FAILURES);
        assert!(!ui.has_success("a via pause"));
    }

    #[test]
    fn split_command_separates_name() {
        assert_eq!(split_command("info"), ("info", ""));
        assert_eq!(split_command("info   -v a"), ("info", "-v a"));
        assert_eq!(split_command("add\t\"x y\""), ("add", "\"x y\""));
    }
}
