use std::{fs, path::PathBuf};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{Breakdown, SummaryService};
use crate::currency::format_percent;
use crate::domain::{Amount, Expense, Receipt};
use crate::storage::{
    spreadsheet::{export_file_name, export_table},
    DatasetKind,
};

use super::usage_error;

const EXPORT_USAGE: &str = "export <receipts|expenses> [path]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Show financial totals and breakdowns",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "export",
            "Export a table to an Excel workbook",
            EXPORT_USAGE,
            cmd_export,
        ),
    ]
}

pub(crate) fn view(context: &mut ShellContext) -> CommandResult {
    render(context)?;
    let actions = ["Export receipts (Excel)", "Export expenses (Excel)", "Back"];
    match cli_io::select_option(&context.theme, "Reports", &actions)? {
        Some(0) => export(context, DatasetKind::Receipts, None),
        Some(1) => export(context, DatasetKind::Expenses, None),
        _ => Ok(()),
    }
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render(context)
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = args
        .first()
        .and_then(|raw| DatasetKind::parse(raw))
        .ok_or_else(|| usage_error(EXPORT_USAGE))?;
    export(context, kind, args.get(1).map(PathBuf::from))
}

fn render(context: &mut ShellContext) -> CommandResult {
    context.records.refresh()?;
    let receipts = context.records.receipts();
    let expenses = context.records.expenses();
    let summary = SummaryService::financial_summary(
        receipts,
        expenses,
        context.config.annual_target,
        context.config.planned_budget,
    )?;
    let by_service = SummaryService::revenue_by_service(receipts)?;
    let by_category = SummaryService::spending_by_category(expenses)?;

    output::section("Dashboard");
    output::key_value("Collected", context.money(summary.collected));
    output::key_value("Spent", context.money(summary.spent));
    output::key_value("Net balance", context.money(summary.net_balance));
    output::key_value(
        "Progress",
        share_line(context, summary.progress_pct, context.config.annual_target, "annual target"),
    );
    output::key_value(
        "Budget consumed",
        share_line(
            context,
            summary.budget_consumption_pct,
            context.config.planned_budget,
            "planned budget",
        ),
    );
    if summary.progress_pct.is_none() || summary.budget_consumption_pct.is_none() {
        output::hint("Use `settings set annual_target <amount>` or `settings set planned_budget <amount>`.");
    }

    output::section("Revenue by service");
    print_breakdown(context, &by_service, "Service");
    output::section("Spending by category");
    print_breakdown(context, &by_category, "Category");
    Ok(())
}

fn share_line(context: &ShellContext, pct: Option<f64>, reference: Amount, name: &str) -> String {
    match pct {
        Some(pct) => format!("{} of {}", format_percent(pct), context.money(reference)),
        None => format!("unavailable, the {name} is zero"),
    }
}

fn print_breakdown<K: PartialEq + std::fmt::Display>(
    context: &ShellContext,
    breakdown: &Breakdown<K>,
    header: &str,
) {
    if breakdown.is_empty() {
        output::info("  (no records yet)");
        return;
    }
    let mut table = Table::new(vec![TableColumn::left(header), TableColumn::right("Amount")]);
    for (key, total) in breakdown.iter() {
        table.push(vec![key.to_string(), context.money(total)]);
    }
    output::info(table.render());
}

fn export(context: &mut ShellContext, kind: DatasetKind, target: Option<PathBuf>) -> CommandResult {
    context.records.refresh()?;
    let bytes = match kind {
        DatasetKind::Receipts => export_table::<Receipt>(context.records.receipts())?,
        DatasetKind::Expenses => export_table::<Expense>(context.records.expenses())?,
    };
    let path = match target {
        Some(path) => path,
        None => context.export_path(export_file_name(kind))?,
    };
    fs::write(&path, bytes)?;
    tracing::info!(dataset = %kind, path = %path.display(), "table exported");
    output::success(format!("Exported {} to {}", kind, path.display()));
    Ok(())
}
