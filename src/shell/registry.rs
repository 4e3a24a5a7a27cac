//! Command registry.
//!
//! The [`CommandRegistry`] maps every command name and alias to a shared
//! [`CommandSpec`] instance, and holds the overlay of built-in commands.
//!
//! Lookup order is fixed: the built-in overlay is consulted before the
//! registered commands, and no registered name may shadow a built-in.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::error::{Result, ShellError};
use crate::ui::UserInterface;

use super::builtins;
use super::command::{CommandFactory, CommandSpec};

/// Handler for a built-in command. Built-ins get shell-split words and no
/// option parsing.
pub type BuiltinHandler = fn(&CommandRegistry, &[String], &mut dyn UserInterface);

/// Completion for a built-in's arguments.
pub type BuiltinCompleter = fn(&CommandRegistry, &str) -> Vec<String>;

/// A command native to the shell.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub about: &'static str,
    pub usage: &'static str,
    pub handler: BuiltinHandler,
    pub complete: Option<BuiltinCompleter>,
}

/// What a name resolved to.
pub enum Resolved<'a> {
    Builtin(&'a Builtin),
    Command(Rc<dyn CommandSpec>),
}

/// Registry of commands and built-ins. Immutable once the shell starts.
pub struct CommandRegistry {
    by_name: BTreeMap<String, Rc<dyn CommandSpec>>,
    overlay: BTreeMap<String, Builtin>,
    load_errors: Vec<ShellError>,
}

impl CommandRegistry {
    /// Create a registry holding only the built-ins.
    pub fn new() -> Self {
        Self {
            by_name: BTreeMap::new(),
            overlay: builtins::overlay()
                .into_iter()
                .map(|b| (b.name.to_string(), b))
                .collect(),
            load_errors: Vec::new(),
        }
    }

    /// Build a registry from a registration table.
    ///
    /// Entries whose identifier starts with `_` are skipped. An entry that
    /// fails to build, or whose names are taken, is recorded in
    /// [`load_errors`](Self::load_errors) and the rest are still loaded.
    pub fn discover(table: &[CommandFactory]) -> Self {
        let mut registry = Self::new();

        for factory in table {
            if factory.name.starts_with('_') {
                continue;
            }

            let outcome = (factory.build)()
                .map_err(|e| ShellError::CommandLoad {
                    name: factory.name.to_string(),
                    message: e.to_string(),
                })
                .and_then(|spec| registry.register(factory.name, Rc::from(spec)));

            if let Err(err) = outcome {
                tracing::warn!("Skipping command '{}': {}", factory.name, err);
                registry.load_errors.push(err);
            }
        }

        tracing::debug!(
            "Registered {} command name(s), {} failure(s)",
            registry.by_name.len(),
            registry.load_errors.len()
        );
        registry
    }

    /// Register `spec` under `name` and each of its aliases.
    ///
    /// All-or-nothing: if any of the names is already taken (by a built-in
    /// or an earlier command) nothing is registered and the earlier owner
    /// keeps the name.
    pub fn register(&mut self, name: &str, spec: Rc<dyn CommandSpec>) -> Result<()> {
        let mut names = vec![name];
        names.extend(spec.aliases().iter().copied().filter(|alias| *alias != name));

        for candidate in &names {
            if self.overlay.contains_key(*candidate) {
                return Err(ShellError::DuplicateCommand {
                    name: candidate.to_string(),
                    owner: "built-in".to_string(),
                });
            }
            if let Some(owner) = self.by_name.get(*candidate) {
                return Err(ShellError::DuplicateCommand {
                    name: candidate.to_string(),
                    owner: owner.name().to_string(),
                });
            }
        }

        for candidate in names {
            self.by_name.insert(candidate.to_string(), Rc::clone(&spec));
        }
        Ok(())
    }

    /// Resolve a name. Built-ins are checked first.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(builtin) = self.overlay.get(name) {
            return Some(Resolved::Builtin(builtin));
        }
        self.by_name.get(name).map(|spec| Resolved::Command(Rc::clone(spec)))
    }

    /// Look up a registered (non built-in) command.
    pub fn command(&self, name: &str) -> Option<Rc<dyn CommandSpec>> {
        self.by_name.get(name).map(Rc::clone)
    }

    /// Look up a built-in.
    pub fn builtin(&self, name: &str) -> Option<&Builtin> {
        self.overlay.get(name)
    }

    /// Every resolvable name, sorted, each once.
    pub fn names(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .overlay
            .keys()
            .chain(self.by_name.keys())
            .map(String::as_str)
            .collect();
        names.into_iter().collect()
    }

    /// Names starting with `prefix`, sorted.
    pub fn complete_names(&self, prefix: &str) -> Vec<String> {
        self.names()
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .map(String::from)
            .collect()
    }

    /// One-line description of whatever `name` resolves to.
    pub fn summary(&self, name: &str) -> Option<String> {
        match self.resolve(name)? {
            Resolved::Builtin(builtin) => Some(builtin.about.to_string()),
            Resolved::Command(spec) => Some(
                spec.about()
                    .and_then(|about| about.lines().next())
                    .unwrap_or_default()
                    .to_string(),
            ),
        }
    }

    /// Failures recorded while building the registry.
    pub fn load_errors(&self) -> &[ShellError] {
        &self.load_errors
    }

    /// Number of registered command names (aliases included, built-ins not).
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
