use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

use super::{dashboard, expense, followup, receipt, settings};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("menu", "Browse the five views", "menu", cmd_menu),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

const VIEWS: [&str; 6] = [
    "Dashboard & reports",
    "Receipts",
    "Expenses",
    "Catalog & follow-up",
    "Settings",
    "Exit",
];

fn cmd_menu(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.require_interactive("menu (interactive mode only)")?;
    loop {
        let Some(choice) = cli_io::select_option(&context.theme, "Navigation", &VIEWS)? else {
            return Ok(());
        };
        cli_io::clear_screen()?;
        let outcome = match choice {
            0 => dashboard::view(context),
            1 => receipt::view(context),
            2 => expense::view(context),
            3 => followup::view(context),
            4 => settings::view(context),
            _ => return Err(CommandError::ExitRequested),
        };
        // Stay in the menu when a single action fails.
        if let Err(err) = outcome {
            context
                .report_error(err)
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        }
    }
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.command(&command) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::CURRENT;
    output::section(format!("Nexus Manager {}", meta.version));
    for (label, value) in meta.details() {
        output::key_value(label, value);
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
