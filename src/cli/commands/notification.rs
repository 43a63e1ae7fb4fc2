use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::core::services::SummaryService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "read",
            "Mark an upcoming charge notification as seen",
            "read <id-prefix|name>",
            cmd_read,
        ),
        CommandEntry::new(
            "unread",
            "List upcoming charges not yet seen",
            "unread",
            cmd_unread,
        ),
        CommandEntry::new(
            "clear-read",
            "Forget every seen notification",
            "clear-read",
            cmd_clear_read,
        ),
    ]
}

fn cmd_read(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [needle] = args else {
        return Err(CommandError::usage("read <id-prefix|name>"));
    };
    let sub = context.snapshot()?.find(needle)?;
    let (id, name) = (sub.id, sub.name.clone());
    if context.read_state.mark_read(id) {
        context.persist_read_state()?;
        output::success(format!("Marked {name} as read."));
    } else {
        output::info(format!("{name} was already read."));
    }
    Ok(())
}

fn cmd_unread(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let days = context.config.upcoming_window_days;
    let snapshot = context.snapshot()?;
    let unread =
        SummaryService::unread_upcoming(&snapshot.subscriptions, today, days, &context.read_state);

    output::section(format!("Unread ({})", unread.len()));
    for sub in unread {
        let date = sub.next_payment_date.map(|d| d.to_string()).unwrap_or_default();
        output::info(format!("  {date}  {}", sub.name));
    }
    Ok(())
}

fn cmd_clear_read(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let cleared = context.read_state.len();
    context.read_state.clear();
    context.persist_read_state()?;
    output::success(format!("Cleared {cleared} read notifications."));
    Ok(())
}
