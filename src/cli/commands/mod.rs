pub mod notification;
pub mod report;
pub mod subscription;
pub mod system;

use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;
use crate::schedule::DateWindow;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(subscription::definitions());
    commands.extend(report::definitions());
    commands.extend(notification::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date (expected YYYY-MM-DD)"))
    })
}

/// `[start end]` arguments as a window, or the month containing `today` when absent.
pub(crate) fn window_args(
    args: &[&str],
    today: NaiveDate,
    usage: &str,
) -> Result<DateWindow, CommandError> {
    match args {
        [] => Ok(DateWindow::month_of(today)),
        [start, end] => Ok(DateWindow::new(parse_date(start)?, parse_date(end)?)?),
        _ => Err(CommandError::usage(usage)),
    }
}
