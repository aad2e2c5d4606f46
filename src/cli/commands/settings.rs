use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::utils::parse_amount_input;
use crate::domain::{cabinet::ProfileField, CabinetProfile};

use super::usage_error;

const USAGE: &str = "settings <show|set|save|reset> ...";
const SET_USAGE: &str = "settings set <key> <value>";

/// Application settings editable with `settings set`, persisted immediately.
const CONFIG_KEYS: [&str; 6] = [
    "currency",
    "annual_target",
    "planned_budget",
    "followup_message",
    "logo",
    "export_dir",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "settings",
        "Show or edit the cabinet profile and application settings",
        "settings show | settings set <key> <value> | settings save | settings reset",
        cmd_settings,
    )]
}

pub(crate) fn view(context: &mut ShellContext) -> CommandResult {
    show(context);
    let mut actions: Vec<String> = ProfileField::ALL
        .iter()
        .map(|field| format!("Edit {}", field.label().to_lowercase()))
        .collect();
    actions.extend(["Save profile".to_string(), "Reset profile".into(), "Back".into()]);

    let Some(choice) = cli_io::select_option(&context.theme, "Settings", &actions)? else {
        return Ok(());
    };
    if let Some(field) = ProfileField::ALL.get(choice).copied() {
        let value =
            cli_io::prompt_text_with_default(&context.theme, field.label(), context.profile.get(field))?;
        context.profile.set(field, value);
        output::success(format!("{} updated for this session.", field.label()));
        return Ok(());
    }
    match choice - ProfileField::ALL.len() {
        0 => save(context),
        1 => reset(context),
        _ => Ok(()),
    }
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value] => set(context, key, value),
        ["save"] => save(context),
        ["reset"] => reset(context),
        [] if context.require_interactive(USAGE).is_ok() => view(context),
        ["set", ..] => Err(usage_error(SET_USAGE)),
        _ => Err(usage_error(USAGE)),
    }
}

fn show(context: &ShellContext) {
    output::section("Cabinet profile");
    for field in ProfileField::ALL {
        output::key_value(field.label(), context.profile.get(field));
    }
    if context.config.cabinet.clone().unwrap_or_default() != context.profile {
        output::hint("Profile has unsaved changes; `settings save` keeps them.");
    }

    let config = &context.config;
    output::section("Application");
    output::key_value("currency", &config.currency_label);
    output::key_value("annual_target", context.money(config.annual_target));
    output::key_value("planned_budget", context.money(config.planned_budget));
    output::key_value("followup_message", &config.followup_message);
    output::key_value(
        "logo",
        context.config_manager.logo_path(config).display(),
    );
    output::key_value(
        "export_dir",
        context.config_manager.export_dir(config).display(),
    );
    output::key_value("data_dir", context.records.backend().location().display());
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    if let Some(field) = ProfileField::parse(key) {
        context.profile.set(field, value.trim());
        output::success(format!("{} updated for this session.", field.label()));
        return Ok(());
    }

    let config = &mut context.config;
    match key.to_ascii_lowercase().as_str() {
        "currency" => config.currency_label = value.trim().to_string(),
        "annual_target" => config.annual_target = parse_amount_input(value)?,
        "planned_budget" => config.planned_budget = parse_amount_input(value)?,
        "followup_message" => config.followup_message = value.to_string(),
        "logo" => config.logo_path = optional_path(value),
        "export_dir" => config.export_dir = optional_path(value),
        other => {
            let profile_keys: Vec<&str> = ProfileField::ALL.iter().map(|field| field.key()).collect();
            return Err(CommandError::InvalidArguments(format!(
                "unknown settings key `{}` (profile: {}; application: {})",
                other,
                profile_keys.join(", "),
                CONFIG_KEYS.join(", ")
            )));
        }
    }
    context.persist_config()?;
    output::success("Configuration updated.");
    let config = &context.config;
    if matches!(key.to_ascii_lowercase().as_str(), "annual_target" | "planned_budget")
        && (config.annual_target == 0 || config.planned_budget == 0)
    {
        output::warning("A zero target or budget leaves its dashboard percentage unavailable.");
    }
    Ok(())
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("default") {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn save(context: &mut ShellContext) -> CommandResult {
    context.config.cabinet = Some(context.profile.clone());
    context.persist_config()?;
    tracing::info!("cabinet profile saved");
    output::success("Cabinet profile saved.");
    Ok(())
}

fn reset(context: &mut ShellContext) -> CommandResult {
    context.profile = CabinetProfile::default();
    if context.config.cabinet.take().is_some() {
        context.persist_config()?;
    }
    output::success("Cabinet profile restored to defaults.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::script_context;
    use crate::config::ConfigManager;
    use tempfile::tempdir;

    #[test]
    fn profile_edits_stay_in_session_until_saved() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context = script_context(dir.path().to_path_buf());

        context
            .process_line(r#"settings set principal "Awa Traoré""#)
            .unwrap();
        assert_eq!(context.profile.principal, "Awa Traoré");
        assert!(manager.load().unwrap().cabinet.is_none());

        context.process_line("settings save").unwrap();
        let saved = manager.load().unwrap().cabinet.unwrap();
        assert_eq!(saved.principal, "Awa Traoré");

        context.process_line("settings reset").unwrap();
        assert!(manager.load().unwrap().cabinet.is_none());
    }

    #[test]
    fn application_settings_persist_immediately() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context = script_context(dir.path().to_path_buf());
        context
            .process_line("settings set annual_target 20000000")
            .unwrap();
        assert_eq!(manager.load().unwrap().annual_target, 20_000_000);
        assert!(context.process_line("settings set colour blue").is_err());
    }
}
