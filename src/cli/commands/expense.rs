use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{ExpenseDraft, ExpenseService};
use crate::core::utils::parse_amount_input;
use crate::domain::{common::format_date, ExpenseCategory};

use super::{parse_choice, usage_error};

const USAGE: &str = "expense <add|list> ...";
const ADD_USAGE: &str = "expense add <category> <description> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Record and list expenses",
        "expense add <category> <description> <amount> | expense list",
        cmd_expense,
    )]
}

pub(crate) fn view(context: &mut ShellContext) -> CommandResult {
    list(context)?;
    let actions = ["Record an expense", "Back"];
    match cli_io::select_option(&context.theme, "Expenses", &actions)? {
        Some(0) => add(context, &[]),
        _ => Ok(()),
    }
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        Some((&"add", rest)) => add(context, rest),
        Some((&"list", _)) => list(context),
        None if context.require_interactive(USAGE).is_ok() => view(context),
        _ => Err(usage_error(USAGE)),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match args {
        [category, description, amount] => ExpenseDraft {
            category: parse_choice(category)?,
            description: description.to_string(),
            amount: parse_amount_input(amount)?,
        },
        [] => {
            context.require_interactive(ADD_USAGE)?;
            prompt_draft(context)?
        }
        _ => return Err(usage_error(ADD_USAGE)),
    };

    let today = context.today();
    let expense = ExpenseService::record(&mut context.records, draft, today)?;
    output::success(format!(
        "Recorded {} under {}.",
        context.money(expense.amount),
        expense.category
    ));
    Ok(())
}

fn prompt_draft(context: &ShellContext) -> Result<ExpenseDraft, CommandError> {
    let theme = &context.theme;
    let category = cli_io::select_option(theme, "Category", &ExpenseCategory::labels())?
        .and_then(|index| ExpenseCategory::ALL.get(index).copied())
        .ok_or_else(|| usage_error(ADD_USAGE))?;
    let description = cli_io::prompt_text(theme, "Description", true)?;
    let amount = cli_io::prompt_amount(theme, "Amount")?;
    Ok(ExpenseDraft {
        category,
        description,
        amount,
    })
}

fn list(context: &mut ShellContext) -> CommandResult {
    context.records.refresh()?;
    output::section("Expenses");
    let expenses = context.records.expenses();
    if expenses.is_empty() {
        output::info("  (no expenses recorded)");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::left("Description"),
        TableColumn::right("Amount"),
    ]);
    for expense in expenses {
        table.push(vec![
            format_date(expense.date),
            expense.category.to_string(),
            expense.description.clone(),
            context.money(expense.amount),
        ]);
    }
    output::info(table.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::script_context;
    use tempfile::tempdir;

    #[test]
    fn negative_amount_is_rejected_at_input() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().to_path_buf());
        assert!(context
            .process_line(r#"expense add "Marketing" "Flyers" -500"#)
            .is_err());
        assert!(context.process_line(r#"expense add "Marketing" "Flyers" abc"#).is_err());
        assert!(context.records.expenses().is_empty());
    }

    #[test]
    fn add_accepts_empty_description() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path().to_path_buf());
        context
            .process_line(r#"expense add "Matériel" "" 85000"#)
            .unwrap();
        assert_eq!(context.records.expenses()[0].amount, 85_000);
        assert!(context.records.expenses()[0].description.is_empty());
    }
}
