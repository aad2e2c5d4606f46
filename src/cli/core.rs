//! Core CLI dispatch and shell context helpers.

use std::{fs, io, path::PathBuf};

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;

use crate::{
    config::{Config, ConfigManager},
    core::{
        record_manager::RecordManager,
        services::{ServiceError, BUDGET_TAG, PROGRESS_TAG},
    },
    currency::format_amount,
    documents::{RenderOptions, PAID_SHARE_TAG},
    domain::{Amount, CabinetProfile, PriceList},
    errors::NexusError,
    storage::CsvRecordStore,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Session state shared by every command handler.
///
/// The cabinet profile lives here for the whole session and only reaches the
/// config file through `settings save`.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) records: RecordManager,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) profile: CabinetProfile,
    pub(crate) prices: PriceList,
    pub(crate) theme: ColorfulTheme,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let store = CsvRecordStore::new(config_manager.data_dir())?;
        let records = RecordManager::open(Box::new(store))?;
        let profile = config.cabinet.clone().unwrap_or_default();
        tracing::info!(
            home = %config_manager.base_dir().display(),
            receipts = records.receipts().len(),
            expenses = records.expenses().len(),
            "shell started"
        );

        Ok(Self {
            mode,
            registry,
            records,
            config_manager,
            config,
            profile,
            prices: PriceList::default(),
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "nexus> ".to_string()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub(crate) fn money(&self, amount: Amount) -> String {
        format_amount(amount, &self.config.currency_label)
    }

    /// Forms need a terminal; script mode must pass the arguments instead.
    pub(crate) fn require_interactive(&self, usage: &str) -> CommandResult {
        if self.mode == CliMode::Interactive {
            Ok(())
        } else {
            Err(CommandError::InvalidArguments(format!("Usage: {usage}")))
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Path inside the export directory, creating the directory on demand.
    pub(crate) fn export_path(&self, file_name: &str) -> Result<PathBuf, CommandError> {
        let dir = self.config_manager.export_dir(&self.config);
        fs::create_dir_all(&dir)?;
        Ok(dir.join(file_name))
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            currency_label: self.config.currency_label.clone(),
            logo_path: Some(self.config_manager.logo_path(&self.config)),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, args = args.len(), "dispatching");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }
        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input, 3) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit Nexus Manager?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(NexusError::DegenerateArithmetic(what)) => {
                self.print_error(&format!("Cannot compute {what}: the reference amount is zero."));
                output::hint(degenerate_hint(what));
                Ok(())
            }
            CommandError::Core(NexusError::AmountOverflow(what)) => {
                self.print_error(&format!("Cannot compute {what}: the amounts are too large."));
                output::hint("Look for an oversized amount in the receipts or expenses file.");
                Ok(())
            }
            other => {
                tracing::warn!(error = %other, "command failed");
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }
}

fn degenerate_hint(what: &str) -> &'static str {
    match what {
        PROGRESS_TAG => "Set a non-zero target with `settings set annual_target <amount>`.",
        BUDGET_TAG => "Set a non-zero budget with `settings set planned_budget <amount>`.",
        PAID_SHARE_TAG => "This receipt has a zero total due; there is no share to print.",
        _ => "Check the amounts involved with `settings show`.",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] NexusError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

/// Failures that stop the shell itself rather than a single command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] NexusError),
    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn script_context(base: PathBuf) -> ShellContext {
    let manager = ConfigManager::with_base_dir(base).unwrap();
    ShellContext::with_config_manager(CliMode::Script, manager).unwrap()
}
