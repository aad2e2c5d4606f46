pub mod dashboard;
pub mod expense;
pub mod followup;
pub mod receipt;
pub mod settings;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandGroup, CommandRegistry};

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    registry.register_group(CommandGroup::Finances, dashboard::definitions());
    registry.register_group(CommandGroup::Finances, receipt::definitions());
    registry.register_group(CommandGroup::Finances, expense::definitions());
    registry.register_group(CommandGroup::Clients, followup::definitions());
    registry.register_group(CommandGroup::Settings, settings::definitions());
    registry.register_group(CommandGroup::Shell, system::definitions());
}

/// Parses a labelled choice typed as a command argument.
pub(crate) fn parse_choice<T>(raw: &str) -> Result<T, CommandError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse::<T>().map_err(CommandError::InvalidArguments)
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {usage}"))
}
