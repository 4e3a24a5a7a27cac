//! `exit`: end the session.

use crate::error::Result;
use crate::shell::{CommandSpec, Context, Flow, Invocation};

#[derive(Debug, Default)]
pub struct ExitCommand;

impl CommandSpec for ExitCommand {
    fn name(&self) -> &str {
        "exit"
    }

    fn aliases(&self) -> &[&str] {
        &["quit"]
    }

    fn usage(&self) -> &str {
        "exit"
    }

    fn about(&self) -> Option<&str> {
        Some("Exit the shell.")
    }

    fn execute(&self, _ctx: &mut Context<'_>, _inv: &Invocation) -> Result<Flow> {
        Ok(Flow::Exit)
    }
}
