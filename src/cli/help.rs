use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for group in CommandGroup::ALL {
        let mut entries = registry.in_group(group).peekable();
        if entries.peek().is_none() {
            continue;
        }
        output::info(format!("{group}:"));
        for entry in entries {
            output::info(format!("  {:<12} {}", entry.name, entry.description));
        }
    }
    output::info("Use `help <command>` for details, or `menu` to browse the views.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::key_value("Description", entry.description);
    output::key_value("Usage", entry.usage);
    output::key_value("Section", entry.group);
}
