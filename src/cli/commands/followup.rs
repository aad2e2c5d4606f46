use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::FollowUpService;
use crate::domain::common::format_date;

/// School programme themes, by audience.
const SCHOOL_CATALOG: [(&str, &[&str]); 2] = [
    ("Students", &["Confidence", "Public speaking", "Study methods"]),
    ("Teachers", &["Classroom management", "Active pedagogy"]),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "catalog",
            "Show the school programme and the price list",
            "catalog",
            cmd_catalog,
        ),
        CommandEntry::new(
            "followup",
            "List unpaid balances with a reminder link",
            "followup",
            cmd_followup,
        ),
    ]
}

pub(crate) fn view(context: &mut ShellContext) -> CommandResult {
    let tabs = ["Catalog", "Unpaid balances", "Back"];
    match cli_io::select_option(&context.theme, "Catalog & follow-up", &tabs)? {
        Some(0) => cmd_catalog(context, &[]),
        Some(1) => cmd_followup(context, &[]),
        _ => Ok(()),
    }
}

fn cmd_catalog(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("School programme");
    for (audience, themes) in SCHOOL_CATALOG {
        output::key_value(audience, themes.join(", "));
    }

    output::section("Price list");
    let mut table = Table::new(vec![TableColumn::left("Service"), TableColumn::right("Price")]);
    for (service, price) in context.prices.iter() {
        table.push(vec![service.to_string(), context.money(price)]);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_followup(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.records.refresh()?;
    output::section("Unpaid balances");
    let reminders = FollowUpService::reminders(
        context.records.receipts(),
        &context.profile,
        &context.config.followup_message,
    );
    if reminders.is_empty() {
        output::success("Every receipt is fully paid.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Client"),
        TableColumn::left("Service"),
        TableColumn::right("Remaining"),
    ]);
    for reminder in &reminders {
        table.push(vec![
            format_date(reminder.balance.date),
            reminder.balance.client.clone(),
            reminder.balance.service.to_string(),
            context.money(reminder.balance.remaining),
        ]);
    }
    output::info(table.render());
    for reminder in &reminders {
        output::warning(format!(
            "{}: {} remaining",
            reminder.balance.client,
            context.money(reminder.balance.remaining)
        ));
        output::info(format!("  Remind on WhatsApp: {}", reminder.link));
    }
    Ok(())
}
