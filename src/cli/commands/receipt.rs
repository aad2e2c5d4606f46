use std::{fs, path::PathBuf};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{ReceiptDraft, ReceiptService};
use crate::core::utils::parse_amount_input;
use crate::documents::{receipt_file_name, render_receipt, ReceiptStatement};
use crate::domain::{common::format_date, PaymentMethod};

use super::{parse_choice, usage_error};

const USAGE: &str = "receipt <add|list|pdf> ...";
const ADD_USAGE: &str = "receipt add <client> <service> <paid> <method>";
const PDF_USAGE: &str = "receipt pdf <client> [path]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "receipt",
        "Record payments, list them, print PDF receipts",
        "receipt add <client> <service> <paid> <method> | receipt list | receipt pdf <client> [path]",
        cmd_receipt,
    )]
}

pub(crate) fn view(context: &mut ShellContext) -> CommandResult {
    list(context)?;
    let actions = ["Record a payment", "Generate a PDF receipt", "Back"];
    match cli_io::select_option(&context.theme, "Receipts", &actions)? {
        Some(0) => add(context, &[]),
        Some(1) => pdf(context, &[]),
        _ => Ok(()),
    }
}

fn cmd_receipt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        Some((&"add", rest)) => add(context, rest),
        Some((&"list", _)) => list(context),
        Some((&"pdf", rest)) => pdf(context, rest),
        None if context.require_interactive(USAGE).is_ok() => view(context),
        _ => Err(usage_error(USAGE)),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match args {
        [client, service, paid, method] => ReceiptDraft {
            client: client.to_string(),
            service: parse_choice(service)?,
            paid: parse_amount_input(paid)?,
            method: parse_choice(method)?,
        },
        [] => {
            context.require_interactive(ADD_USAGE)?;
            prompt_draft(context)?
        }
        _ => return Err(usage_error(ADD_USAGE)),
    };

    let today = context.today();
    let receipt = ReceiptService::record(&mut context.records, draft, &context.prices, today)?;
    output::success(format!(
        "Recorded {} from {} for {}.",
        context.money(receipt.paid),
        receipt.client,
        receipt.service
    ));
    match ReceiptStatement::from_record(&receipt) {
        Ok(statement) => output::info(format!(
            "  {} of {} paid, {} remaining.",
            statement.percent_label(),
            context.money(statement.total_due),
            context.money(statement.remaining)
        )),
        Err(err) => output::warning(err),
    }
    Ok(())
}

fn prompt_draft(context: &ShellContext) -> Result<ReceiptDraft, crate::cli::core::CommandError> {
    let theme = &context.theme;
    let client = cli_io::prompt_text(theme, "Client name", false)?;
    let services: Vec<String> = context
        .prices
        .iter()
        .map(|(service, price)| format!("{} ({})", service, context.money(price)))
        .collect();
    let service = cli_io::select_option(theme, "Service", &services)?
        .and_then(|index| context.prices.iter().nth(index))
        .map(|(service, _)| service)
        .ok_or_else(|| usage_error(ADD_USAGE))?;
    let paid = cli_io::prompt_amount(theme, "Amount paid")?;
    let method = cli_io::select_option(theme, "Payment method", &PaymentMethod::labels())?
        .and_then(|index| PaymentMethod::ALL.get(index).copied())
        .ok_or_else(|| usage_error(ADD_USAGE))?;
    Ok(ReceiptDraft {
        client,
        service,
        paid,
        method,
    })
}

fn list(context: &mut ShellContext) -> CommandResult {
    context.records.refresh()?;
    output::section("Receipts");
    let receipts = context.records.receipts();
    if receipts.is_empty() {
        output::info("  (no receipts recorded)");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Client"),
        TableColumn::left("Service"),
        TableColumn::right("Total"),
        TableColumn::right("Paid"),
        TableColumn::left("Method"),
    ]);
    for receipt in receipts {
        table.push(vec![
            format_date(receipt.date),
            receipt.client.clone(),
            receipt.service.to_string(),
            context.money(receipt.total_due),
            context.money(receipt.paid),
            receipt.method.to_string(),
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn pdf(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.records.refresh()?;
    let (client, target) = match args {
        [client] => (client.to_string(), None),
        [client, path] => (client.to_string(), Some(PathBuf::from(path))),
        [] => {
            context.require_interactive(PDF_USAGE)?;
            let names = ReceiptService::client_names(context.records.receipts());
            if names.is_empty() {
                output::info("No receipts recorded yet.");
                return Ok(());
            }
            match cli_io::select_option(&context.theme, "Client", &names)? {
                Some(index) => (names[index].to_string(), None),
                None => return Ok(()),
            }
        }
        _ => return Err(usage_error(PDF_USAGE)),
    };

    let receipt = ReceiptService::latest_for_client(context.records.receipts(), &client)
        .ok_or_else(|| {
            crate::cli::core::CommandError::InvalidArguments(format!(
                "No receipt recorded for `{client}`"
            ))
        })?;
    let bytes = render_receipt(receipt, &context.profile, &context.render_options())?;
    let path = match target {
        Some(path) => path,
        None => context.export_path(&receipt_file_name(&receipt.client))?,
    };
    fs::write(&path, bytes)?;
    tracing::info!(client = %receipt.client, path = %path.display(), "receipt document written");
    output::success(format!("Receipt generated: {}", path.display()));
    Ok(())
}
