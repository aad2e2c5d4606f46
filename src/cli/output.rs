use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
    Plain,
}

fn build_label(kind: MessageKind) -> Option<&'static str> {
    match kind {
        MessageKind::Success => Some("[ok]"),
        MessageKind::Warning => Some("[!]"),
        MessageKind::Error => Some("[x]"),
        MessageKind::Hint => Some("hint:"),
        MessageKind::Info | MessageKind::Section | MessageKind::Plain => None,
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match (kind, build_label(kind)) {
        (MessageKind::Section, _) => format!("=== {} ===", text.trim()),
        (_, Some(label)) => format!("{label} {text}"),
        (_, None) => text,
    };

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info | MessageKind::Plain => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints a `label : value` line aligned on the colon.
pub fn key_value(label: &str, value: impl fmt::Display) {
    print(MessageKind::Plain, format!("  {label:<18}: {value}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_framed() {
        colored::control::set_override(false);
        assert_eq!(apply_style(MessageKind::Section, " Dashboard "), "=== Dashboard ===");
        assert_eq!(apply_style(MessageKind::Error, "boom"), "[x] boom");
        assert_eq!(apply_style(MessageKind::Info, "plain"), "plain");
    }
}
