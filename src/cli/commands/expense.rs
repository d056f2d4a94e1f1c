use std::collections::HashMap;

use serde::Serialize;
use spendlog_core::{CategoryTotal, DailyTotal, ExpenseSummary};
use spendlog_domain::{Displayable, Expense};
use uuid::Uuid;

use crate::cli::core::{parse_args, short_id, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{render_table, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::form::{ExpenseForm, ExpensePatch};
use crate::format::{CurrencyFormatter, DateFormatter};
use crate::session::{deleted_message, ADDED_MESSAGE};

const EDIT_OPTIONS: [&str; 4] = ["amount", "description", "category", "date"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add <amount> <description> [--category <name>] [--date <YYYY-MM-DD[ HH:MM]>]",
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List expenses newest first, optionally filtered",
            "list [search terms]",
            cmd_list,
        ),
        CommandEntry::new("show", "Show one expense in detail", "show <ref>", cmd_show),
        CommandEntry::new(
            "edit",
            "Change fields of an expense",
            "edit <ref> [--amount <n>] [--description <text>] [--category <name>] [--date <date>]",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Delete an expense (can be undone)",
            "delete <ref> [--yes]",
            cmd_delete,
        ),
        CommandEntry::new(
            "undo",
            "Restore the most recently deleted expense",
            "undo",
            cmd_undo,
        ),
        CommandEntry::new(
            "export",
            "Print expenses and totals as JSON",
            "export",
            cmd_export,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["category", "date"], &[])?;
    let Some((amount, description)) = parsed.positional.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: add <amount> <description> [--category <name>] [--date <date>]".into(),
        ));
    };

    let form = ExpenseForm {
        amount: amount.to_string(),
        description: description.join(" "),
        category: parsed.option("category").map(str::to_string),
        date: parsed.option("date").map(str::to_string),
    };
    let input = form.validate(context.tracker.clock().now(), &context.config.default_category)?;
    let added = context.tracker.add(input);

    io::print_success(ADDED_MESSAGE);
    io::print_info(format!(
        "  {} {} ({}) on {}",
        short_id(added.id),
        context.formatters.format_amount(added.amount),
        added.category,
        context.formatters.format_timestamp(added.date)
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let term = args.join(" ");
    let positions: HashMap<Uuid, usize> = context
        .tracker
        .list("")
        .iter()
        .enumerate()
        .map(|(idx, expense)| (expense.id, idx + 1))
        .collect();
    let matches = context.tracker.list(&term);

    if matches.is_empty() {
        if positions.is_empty() {
            io::print_info("No expenses recorded yet.");
            io::print_hint("Use `add <amount> <description>` to record one.");
        } else {
            io::print_info(format!("No expenses match `{}`.", term));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|expense| {
            vec![
                positions
                    .get(&expense.id)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                short_id(expense.id),
                context.formatters.format_timestamp(expense.date),
                expense.description.clone(),
                expense.category.clone(),
                context.formatters.format_amount(expense.amount),
            ]
        })
        .collect();

    output_section("Transactions");
    io::print_info(render_table(
        &["#", "Id", "Date", "Description", "Category", "Amount"],
        &rows,
    ));
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let expense = lookup(context, args, "usage: show <ref>")?;
    output_section(format!("Expense {}", short_id(expense.id)));
    io::print_info(format!("  Id         : {}", expense.id));
    io::print_info(format!(
        "  Amount     : {}",
        context.formatters.format_amount(expense.amount)
    ));
    io::print_info(format!("  Description: {}", expense.description));
    io::print_info(format!("  Category   : {}", expense.category));
    io::print_info(format!(
        "  Date       : {} {}",
        context.formatters.format_timestamp(expense.date),
        expense.date.format("%H:%M")
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &EDIT_OPTIONS, &[])?;
    let [reference] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <ref> [--amount <n>] [--description <text>] [--category <name>] [--date <date>]"
                .into(),
        ));
    };
    let patch = ExpensePatch::from_fields(
        parsed.option("amount"),
        parsed.option("description"),
        parsed.option("category"),
        parsed.option("date"),
    )?;
    if patch.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change; pass at least one of --amount, --description, --category, --date"
                .into(),
        ));
    }

    let id = context.resolve_expense(reference)?;
    let edited = context
        .tracker
        .edit(id, &patch)
        .ok_or_else(|| CommandError::NotFound(reference.to_string()))?;
    io::print_success(format!(
        "Updated \"{}\": {} ({}) on {}",
        edited.description,
        context.formatters.format_amount(edited.amount),
        edited.category,
        context.formatters.format_timestamp(edited.date)
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[], &["yes"])?;
    let [reference] = parsed.positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <ref> [--yes]".into(),
        ));
    };
    let id = context.resolve_expense(reference)?;

    if context.mode() == CliMode::Interactive && !parsed.has_switch("yes") {
        let label = context
            .tracker
            .store()
            .get(id)
            .map(Displayable::display_label)
            .unwrap_or_default();
        let prompt = format!("Are you sure? This will delete {} from your expenses.", label);
        if !io::confirm_action(&prompt, false)? {
            io::print_info("Deletion cancelled.");
            return Ok(());
        }
    }

    let removed = context
        .tracker
        .delete(id)
        .ok_or_else(|| CommandError::NotFound(reference.to_string()))?;
    io::print_success(deleted_message(&removed));
    let window_secs = context.config.notices.undo_window_ms.saturating_add(999) / 1000;
    io::print_hint(format!(
        "Type `undo` within {}s to restore it.",
        window_secs
    ));
    Ok(())
}

fn cmd_undo(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.tracker.undo() {
        Some(restored) => io::print_success(format!("Restored \"{}\".", restored.description)),
        None => io::print_warning("Nothing to undo."),
    }
    Ok(())
}

#[derive(Serialize)]
struct Snapshot<'a> {
    expenses: Vec<&'a Expense>,
    summary: ExpenseSummary,
    weekly: Vec<DailyTotal>,
    categories: Vec<CategoryTotal>,
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let tracker = &context.tracker;
    let snapshot = Snapshot {
        expenses: tracker.list(""),
        summary: tracker.summary(),
        weekly: tracker.weekly(),
        categories: tracker.categories(),
    };
    io::print_info(serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn lookup<'a>(
    context: &'a ShellContext,
    args: &[&str],
    usage: &str,
) -> Result<&'a Expense, CommandError> {
    let [reference] = args else {
        return Err(CommandError::InvalidArguments(usage.to_string()));
    };
    let id = context.resolve_expense(reference)?;
    context
        .tracker
        .store()
        .get(id)
        .ok_or_else(|| CommandError::NotFound(reference.to_string()))
}
