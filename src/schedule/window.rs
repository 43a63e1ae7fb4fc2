use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::SubcycleError;

/// Inclusive calendar-day range `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SubcycleError> {
        if end < start {
            return Err(SubcycleError::InvalidInput(format!(
                "window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// The month after the one this window starts in.
    pub fn next_month(&self) -> Self {
        let first = self
            .start
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .unwrap_or(NaiveDate::MAX);
        Self::month_of(first)
    }

    /// The month before the one this window starts in.
    pub fn previous_month(&self) -> Self {
        let first = self
            .start
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(1)))
            .unwrap_or(NaiveDate::MIN);
        Self::month_of(first)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// `date` shifted by `days`, saturating at the ends of the calendar.
pub fn days_after(date: NaiveDate, days: i64) -> NaiveDate {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(delta).unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(DateWindow::new(date(2025, 2, 1), date(2025, 1, 1)).is_err());
        let single = DateWindow::new(date(2025, 1, 1), date(2025, 1, 1)).unwrap();
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn month_windows_cover_whole_months() {
        let feb = DateWindow::month_of(date(2024, 2, 17));
        assert_eq!(feb.start, date(2024, 2, 1));
        assert_eq!(feb.end, date(2024, 2, 29));
        assert_eq!(feb.next_month().end, date(2024, 3, 31));
        let jan = DateWindow::month_of(date(2025, 1, 5));
        assert_eq!(jan.previous_month().start, date(2024, 12, 1));
        assert_eq!(jan.previous_month().end, date(2024, 12, 31));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
    }

    #[test]
    fn day_offsets_saturate_at_calendar_limits() {
        assert_eq!(days_after(date(2025, 1, 1), 7), date(2025, 1, 8));
        assert_eq!(days_after(date(2025, 1, 1), -1), date(2024, 12, 31));
        assert_eq!(days_after(date(2025, 1, 1), 100_000_000), NaiveDate::MAX);
        assert_eq!(days_after(date(2025, 1, 1), i64::MIN), NaiveDate::MIN);
    }
}
