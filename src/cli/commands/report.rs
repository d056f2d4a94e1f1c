use crate::cli::chart::{render_bars, DEFAULT_BAR_WIDTH};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::form::parse_day;
use crate::format::{CurrencyFormatter, DateFormatter};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show today's spending, totals and the top category",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "week",
            "Chart daily spending for a week",
            "week [YYYY-MM-DD]",
            cmd_week,
        ),
        CommandEntry::new(
            "categories",
            "Chart spending per category",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.tracker.summary();
    let money = &context.formatters;
    output_section("Summary");
    io::print_info(format!(
        "  Today          : {}",
        money.format_amount(summary.today_total)
    ));
    io::print_info(format!(
        "  Total expenses : {}",
        money.format_amount(summary.total_all)
    ));
    io::print_info(format!("  Transactions   : {}", summary.transaction_count));
    io::print_info(format!("  Top category   : {}", summary.top_category));
    Ok(())
}

fn cmd_week(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = match args {
        [] => context.tracker.clock().today(),
        [raw] => parse_day(raw)?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: week [YYYY-MM-DD]".into(),
            ))
        }
    };

    let series = context.tracker.weekly_for(reference);
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Ok(());
    };
    output_section(format!(
        "Week of {} - {}",
        context.formatters.format_short(first.date),
        context.formatters.format_date(last.date)
    ));

    let rows: Vec<(String, f64)> = series
        .iter()
        .map(|day| {
            (
                format!("{} {}", day.label, context.formatters.format_short(day.date)),
                day.amount,
            )
        })
        .collect();
    io::print_info(render_bars(&rows, &context.formatters, DEFAULT_BAR_WIDTH));

    let total: f64 = series.iter().map(|day| day.amount).sum();
    io::print_info(format!(
        "Week total: {}",
        context.formatters.format_amount(total)
    ));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let mut series = context.tracker.categories();
    if series.is_empty() {
        io::print_info("No expenses recorded yet.");
        return Ok(());
    }
    series.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    output_section("Spending by category");
    let rows: Vec<(String, f64)> = series
        .into_iter()
        .map(|category| (category.label, category.amount))
        .collect();
    io::print_info(render_bars(&rows, &context.formatters, DEFAULT_BAR_WIDTH));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::cli::core::test_support::*;
    use crate::cli::core::CommandError;

    #[test]
    fn week_rejects_malformed_dates() {
        let clock = Arc::new(ManualClock::new(friday_morning()));
        let (mut context, _dir) = script_context(clock);
        assert!(matches!(
            context.process_line("week 16/10/2026"),
            Err(CommandError::Form(_))
        ));
        assert!(matches!(
            context.process_line("week 2026-10-12 2026-10-13"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn reports_run_on_empty_and_populated_stores() {
        let clock = Arc::new(ManualClock::new(friday_morning()));
        let (mut context, _dir) = script_context(clock);
        run(
            &mut context,
            &[
                "summary",
                "categories",
                "week",
                "add 10 Bus --category Transport --date 2026-10-12",
                "add 25 Groceries --category Food --date 2026-10-13",
                "summary",
                "week 2026-10-14",
                "categories",
            ],
        );
        let summary = context.tracker.summary();
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.top_category, "Food");
    }
}
