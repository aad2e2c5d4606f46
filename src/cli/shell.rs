use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use colored::Colorize;

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::{split, ParseError};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

/// Environment variable switching the shell to non-interactive script mode.
pub const SCRIPT_ENV: &str = "NEXUS_MANAGER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.registry.signatures())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::section(format!("Nexus Manager · {}", context.profile.name));
    output::info("Type `menu` (or press Enter) to browse the views, `help` for commands.");

    while context.running {
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                let line = if trimmed.is_empty() { "menu" } else { trimmed };
                if !trimmed.is_empty() {
                    editor.add_history_entry(trimmed).ok();
                }

                match handle_line(context, line) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.to_string());
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() || tokens[0].starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Line-editor support: completes command names, hints the argument
/// synopsis of a typed command and holds back lines with unbalanced quotes.
struct CommandHelper {
    signatures: Vec<(&'static str, &'static str)>,
}

impl CommandHelper {
    fn new(mut signatures: Vec<(&'static str, &'static str)>) -> Self {
        signatures.sort_by_key(|(name, _)| *name);
        Self { signatures }
    }

    /// Argument synopsis once the line holds exactly one known command word.
    fn synopsis(&self, line: &str) -> Option<String> {
        let typed = line.trim_start();
        let (word, rest) = typed.split_once(' ').unwrap_or((typed, ""));
        if !rest.trim().is_empty() {
            return None;
        }
        let (_, arguments) = self
            .signatures
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))?;
        if arguments.is_empty() {
            return None;
        }
        Some(if typed.ends_with(' ') {
            arguments.to_string()
        } else {
            format!(" {arguments}")
        })
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        // Only the first word is completed.
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .signatures
            .iter()
            .filter(|(name, _)| name.starts_with(&needle))
            .map(|(name, _)| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.synopsis(line)
    }
}

impl Highlighter for CommandHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(match parse_command_line(ctx.input()) {
            Ok(_) => ValidationResult::Valid(None),
            Err(_) => ValidationResult::Invalid(Some("  (close the quote)".into())),
        })
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens =
            parse_command_line(r#"receipt add "Awa Traoré" "Accompagnement Particulier" 50000"#)
                .unwrap();
        assert_eq!(
            tokens,
            vec!["receipt", "add", "Awa Traoré", "Accompagnement Particulier", "50000"]
        );
    }

    #[test]
    fn unbalanced_quotes_are_a_parse_error() {
        assert!(parse_command_line(r#"receipt add "Awa"#).is_err());
    }

    fn helper() -> CommandHelper {
        CommandHelper::new(vec![
            ("receipt", "<add|list|pdf> ..."),
            ("dashboard", ""),
        ])
    }

    #[test]
    fn synopsis_follows_a_single_command_word() {
        let helper = helper();
        assert_eq!(helper.synopsis("receipt").as_deref(), Some(" <add|list|pdf> ..."));
        assert_eq!(helper.synopsis("receipt ").as_deref(), Some("<add|list|pdf> ..."));
        assert_eq!(helper.synopsis("receipt add"), None);
        assert_eq!(helper.synopsis("dashboard"), None);
        assert_eq!(helper.synopsis("unknown"), None);
    }
}
