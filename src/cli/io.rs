//! Interactive prompts used by the view forms.

use std::io::{self, Write};

use crossterm::{cursor, terminal, ExecutableCommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::core::utils::parse_amount_input;
use crate::domain::Amount;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt the user for free-form text input.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str, allow_empty: bool) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(CommandError::from)
}

/// Text prompt pre-filled with the current value.
pub fn prompt_text_with_default(
    theme: &ColorfulTheme,
    prompt: &str,
    current: &str,
) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .interact_text()
        .map(|value| value.trim().to_string())
        .map_err(CommandError::from)
}

/// Re-asks until the operator enters a whole, non-negative amount.
pub fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<Amount, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|raw: &String| parse_amount_input(raw).map(|_| ()).map_err(|err| err.to_string()))
        .interact_text()
        .map_err(CommandError::from)
        .and_then(|raw| parse_amount_input(&raw).map_err(CommandError::from))
}

/// Single-choice selection; `None` when the operator presses ESC.
pub fn select_option<T: ToString>(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[T],
) -> Result<Option<usize>, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(CommandError::from)
}

pub fn clear_screen() -> Result<(), CommandError> {
    let mut stdout = io::stdout();
    stdout.execute(terminal::Clear(terminal::ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}
