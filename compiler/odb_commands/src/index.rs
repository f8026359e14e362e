//! Lookup of command overloads by name.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::Command;

/// Read-only query interface the semantic pass needs from the command table.
pub trait CommandIndex {
    /// All overloads registered under `name`, in registration order.
    ///
    /// Returns an empty slice for unknown names.
    fn lookup(&self, name: &str) -> &[Arc<Command>];
}

/// Two overloads of the same command with identical signatures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandConflict {
    pub first: Arc<Command>,
    pub redefinition: Arc<Command>,
}

/// In-memory command table.
///
/// Names are matched case-insensitively, as in source code.
#[derive(Clone, Debug, Default)]
pub struct CommandDb {
    commands: Vec<Arc<Command>>,
    by_name: FxHashMap<String, Vec<Arc<Command>>>,
}

impl CommandDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overload. Later overloads sort after earlier ones.
    pub fn add(&mut self, command: Command) -> Arc<Command> {
        let command = Arc::new(command);
        self.by_name
            .entry(command.symbol().to_ascii_lowercase())
            .or_default()
            .push(Arc::clone(&command));
        self.commands.push(Arc::clone(&command));
        command
    }

    /// All commands in registration order.
    pub fn commands(&self) -> &[Arc<Command>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Find overloads that redefine an earlier overload's exact signature.
    pub fn find_conflicts(&self) -> Vec<CommandConflict> {
        let mut conflicts = Vec::new();
        let mut seen: FxHashMap<String, Vec<&Arc<Command>>> = FxHashMap::default();
        for command in &self.commands {
            let overloads = seen
                .entry(command.symbol().to_ascii_lowercase())
                .or_default();
            if let Some(first) = overloads.iter().find(|o| o.same_signature(command)) {
                tracing::debug!(
                    symbol = command.symbol(),
                    signature = %command.signature(),
                    "command redefined"
                );
                conflicts.push(CommandConflict {
                    first: Arc::clone(first),
                    redefinition: Arc::clone(command),
                });
            }
            overloads.push(command);
        }
        conflicts
    }
}

impl CommandIndex for CommandDb {
    fn lookup(&self, name: &str) -> &[Arc<Command>] {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl FromIterator<Command> for CommandDb {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut db = CommandDb::new();
        for command in iter {
            db.add(command);
        }
        db
    }
}
