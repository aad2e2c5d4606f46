use std::fmt;

use strsim::levenshtein;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Heading under which `help` lists a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Finances,
    Clients,
    Settings,
    Shell,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 4] = [
        CommandGroup::Finances,
        CommandGroup::Clients,
        CommandGroup::Settings,
        CommandGroup::Shell,
    ];
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommandGroup::Finances => "Receipts, expenses and reports",
            CommandGroup::Clients => "Catalog and follow-up",
            CommandGroup::Settings => "Settings",
            CommandGroup::Shell => "Shell",
        })
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub group: CommandGroup,
    pub handler: CommandHandler,
}

impl CommandEntry {
    /// The group is assigned by [`CommandRegistry::register_group`].
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            group: CommandGroup::Shell,
            handler,
        }
    }

    /// Usage text after the command name, e.g. `<add|list|pdf> ...` for `receipt`.
    pub fn arguments(&self) -> &'static str {
        self.usage
            .strip_prefix(self.name)
            .map(str::trim_start)
            .unwrap_or("")
    }
}

/// Commands in registration order. The table is small, so lookups scan it.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every entry under `group`; a repeated name replaces the earlier entry.
    pub fn register_group(&mut self, group: CommandGroup, entries: Vec<CommandEntry>) {
        for mut entry in entries {
            entry.group = group;
            match self.entries.iter_mut().find(|existing| existing.name == entry.name) {
                Some(existing) => *existing = entry,
                None => self.entries.push(entry),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.group == group)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// `(name, arguments)` pairs for the line editor's completion and hints.
    pub fn signatures(&self) -> Vec<(&'static str, &'static str)> {
        self.entries
            .iter()
            .map(|entry| (entry.name, entry.arguments()))
            .collect()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Closest command name within `max_distance` edits of `input`.
    pub fn closest(&self, input: &str, max_distance: usize) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= max_distance)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}
