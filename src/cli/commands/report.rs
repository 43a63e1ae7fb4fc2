use super::window_args;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::core::services::{DashboardService, SummaryService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "distribution",
            "Spend per category in a window (default: this month)",
            "distribution [start end]",
            cmd_distribution,
        ),
        CommandEntry::new(
            "totals",
            "Charges in a window (default: this and next month)",
            "totals [start end]",
            cmd_totals,
        ),
        CommandEntry::new(
            "average",
            "Steady-state monthly cost",
            "average",
            cmd_average,
        ),
        CommandEntry::new(
            "upcoming",
            "Charges due in the next few days",
            "upcoming [days]",
            cmd_upcoming,
        ),
        CommandEntry::new(
            "overdue",
            "Subscriptions whose next payment date has passed",
            "overdue",
            cmd_overdue,
        ),
        CommandEntry::new(
            "dashboard",
            "Headline statistics for this month",
            "dashboard",
            cmd_dashboard,
        ),
    ]
}

fn cmd_distribution(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let window = window_args(args, context.today(), "distribution [start end]")?;
    let snapshot = context.snapshot()?;
    let spend =
        SummaryService::category_distribution(&snapshot.subscriptions, &snapshot.categories, window);

    output::section(format!("Spend by category, {} to {}", window.start, window.end));
    if spend.is_empty() {
        output::info("No categorized charges in range.");
        return Ok(());
    }
    let total: f64 = spend.iter().map(|entry| entry.amount).sum();
    for entry in &spend {
        output::info(format!(
            "  {:<24} {:>14} {:>6.1}%",
            entry.name,
            output::money(entry.amount, context.currency()),
            entry.amount / total * 100.0
        ));
    }
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.today();
    let snapshot = context.snapshot()?;
    let subs = &snapshot.subscriptions;
    let currency = context.currency();

    if !args.is_empty() {
        let window = window_args(args, today, "totals [start end]")?;
        output::info(format!(
            "Total {} to {}: {}",
            window.start,
            window.end,
            output::money(SummaryService::range_total(subs, window), currency)
        ));
        return Ok(());
    }

    output::section("Totals");
    output::info(format!(
        "  This month   : {}",
        output::money(SummaryService::month_total(subs, today), currency)
    ));
    output::info(format!(
        "  Next month   : {}",
        output::money(SummaryService::next_month_total(subs, today), currency)
    ));
    output::info(format!(
        "  Next 30 days : {}",
        output::money(SummaryService::next_30_days_total(subs, today), currency)
    ));
    Ok(())
}

fn cmd_average(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot()?;
    let average = SummaryService::monthly_average(&snapshot.subscriptions);
    output::info(format!(
        "Monthly average: {}",
        output::money(average, context.currency())
    ));
    Ok(())
}

fn cmd_upcoming(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let days = match args {
        [] => context.config.upcoming_window_days,
        [raw] => raw
            .parse::<i64>()
            .ok()
            .filter(|days| *days > 0)
            .ok_or_else(|| CommandError::usage("upcoming [days]"))?,
        _ => return Err(CommandError::usage("upcoming [days]")),
    };
    let today = context.today();
    let snapshot = context.snapshot()?;
    let upcoming = SummaryService::upcoming(&snapshot.subscriptions, today, days);

    output::section(format!("Due in the next {days} days"));
    if upcoming.is_empty() {
        output::info("Nothing due.");
        return Ok(());
    }
    for sub in upcoming {
        let marker = if context.read_state.is_read(sub.id) { " " } else { "*" };
        let date = sub.next_payment_date.map(|d| d.to_string()).unwrap_or_default();
        output::info(format!(
            "{marker} {date}  {:<24} {}",
            sub.name,
            output::money(sub.amount, context.currency())
        ));
    }
    Ok(())
}

fn cmd_overdue(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let snapshot = context.snapshot()?;
    let overdue = SummaryService::overdue(&snapshot.subscriptions, today);

    output::section("Overdue");
    if overdue.is_empty() {
        output::info("Nothing overdue.");
        return Ok(());
    }
    for sub in overdue {
        let date = sub.next_payment_date.map(|d| d.to_string()).unwrap_or_default();
        output::info(format!("  {date}  {}", sub.name));
    }
    output::info("Run `rollover` to move these dates forward.");
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let limit = context.config.top_subscription_limit;
    let snapshot = context.snapshot()?;
    let stats = DashboardService::statistics(&snapshot.subscriptions, today, limit);
    let currency = context.currency();

    output::section(format!("Dashboard for {today}"));
    output::info(format!("  Subscriptions   : {}", stats.total_subscriptions));
    output::info(format!(
        "  This month      : {} paid of {} ({:.2}%)",
        output::money(stats.current_month_paid, currency),
        output::money(stats.current_month_total, currency),
        stats.current_month_progress
    ));
    output::info(format!(
        "  Remaining       : {}",
        output::money(stats.current_month_remaining, currency)
    ));
    output::info(format!(
        "  Last month      : {} (change {:+.2}, {:+.2}%)",
        output::money(stats.last_month_total, currency),
        stats.month_over_month_change,
        stats.month_over_month_change_percent
    ));
    output::info(format!(
        "  Next month      : {}",
        output::money(stats.next_month_total, currency)
    ));
    output::info(format!(
        "  Next 30 days    : {}",
        output::money(stats.next_30_days_total, currency)
    ));
    output::info(format!(
        "  Monthly average : {}",
        output::money(stats.monthly_average, currency)
    ));
    if !stats.top_subscriptions.is_empty() {
        output::info("  Top this month:");
        for (rank, top) in stats.top_subscriptions.iter().enumerate() {
            output::info(format!(
                "    {}. {:<22} {}",
                rank + 1,
                top.name,
                output::money(top.month_amount, currency)
            ));
        }
    }
    Ok(())
}
