use std::path::PathBuf;

use super::parse_date;
use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::domain::{Displayable, Identifiable, NamedEntity};
use crate::schedule::{payments_in_range, roll_forward_all, Rollover, MAX_ITERATIONS};
use crate::store::Snapshot;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Load a subscription snapshot from JSON",
            "load <path>",
            cmd_load,
        ),
        CommandEntry::new(
            "today",
            "Show or pin the reporting day",
            "today [YYYY-MM-DD|clear]",
            cmd_today,
        ),
        CommandEntry::new("list", "List loaded subscriptions", "list", cmd_list),
        CommandEntry::new(
            "payments",
            "Enumerate charge dates of one subscription",
            "payments <id-prefix|name> <start> <end>",
            cmd_payments,
        ),
        CommandEntry::new(
            "rollover",
            "Move stale next payment dates forward and save",
            "rollover",
            cmd_rollover,
        ),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(CommandError::usage("load <path>"));
    };
    let path = PathBuf::from(path);
    let snapshot = Snapshot::load(&path)?;
    output::success(format!(
        "Loaded {} subscriptions and {} categories from {}.",
        snapshot.subscriptions.len(),
        snapshot.categories.len(),
        path.display()
    ));
    context.snapshot = Some(snapshot);
    context.config.last_snapshot = Some(path.clone());
    context.snapshot_path = Some(path);
    context.persist_config()
}

fn cmd_today(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        ["clear"] => context.today_override = None,
        [raw] => context.today_override = Some(parse_date(raw)?),
        _ => return Err(CommandError::usage("today [YYYY-MM-DD|clear]")),
    }
    let pinned = if context.today_override.is_some() { " (pinned)" } else { "" };
    output::info(format!("Today is {}{pinned}.", context.today()));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot()?;
    let currency = context.currency();
    output::section("Subscriptions");
    if snapshot.subscriptions.is_empty() {
        output::info("No subscriptions.");
        return Ok(());
    }
    for sub in &snapshot.subscriptions {
        let next = sub
            .next_payment_date
            .map_or_else(|| "-".to_string(), |date| date.to_string());
        let category = sub
            .category_id
            .and_then(|id| snapshot.category(id))
            .map_or("-", |cat| cat.name());
        output::info(format!(
            "  {}  {:<24} {:>14} {:<10} next {:<10} {}",
            sub.short_id(),
            sub.name,
            output::money(sub.amount, currency),
            sub.cycle,
            next,
            category
        ));
    }
    Ok(())
}

fn cmd_payments(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [needle, start, end] = args else {
        return Err(CommandError::usage("payments <id-prefix|name> <start> <end>"));
    };
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let snapshot = context.snapshot()?;
    let sub = snapshot.find(needle)?;

    output::section(format!("Charges of {} from {start} to {end}", sub.display_label()));
    let dates: Vec<_> = payments_in_range(sub, start, end).collect();
    for date in &dates {
        output::info(format!("  {date}  {}", output::money(sub.amount, context.currency())));
    }
    if dates.is_empty() {
        output::info("No charges in range.");
    } else {
        output::info(format!(
            "{} charges, {}",
            dates.len(),
            output::money(sub.amount * dates.len() as f64, context.currency())
        ));
    }
    if dates.len() >= MAX_ITERATIONS {
        output::warning("Enumeration stopped at the iteration cap; later dates were not listed.");
    }
    Ok(())
}

fn cmd_rollover(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let changes = roll_forward_all(&context.snapshot()?.subscriptions, today);
    if changes.is_empty() {
        output::info("All next payment dates are current.");
        return Ok(());
    }

    let snapshot = context.snapshot_mut()?;
    for (id, outcome) in &changes {
        let name = snapshot
            .subscriptions
            .iter()
            .find(|sub| sub.id == *id)
            .map_or("?", |sub| sub.name.as_str());
        match outcome {
            Rollover::Advanced { from, to } => output::info(format!("  {name}: {from} -> {to}")),
            Rollover::Expired { last_due } => {
                output::info(format!("  {name}: ended after {last_due}"))
            }
            Rollover::Unchanged => {}
        }
    }
    snapshot.apply_rollovers(&changes);

    if let Some(path) = context.snapshot_path.as_ref() {
        context.snapshot()?.save(path)?;
        output::success(format!("Updated {} subscriptions in {}.", changes.len(), path.display()));
    }
    Ok(())
}
