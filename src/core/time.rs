use chrono::{Local, NaiveDate};

/// Source of the reporting day. Services take the day as an argument; the
/// shell asks a `Clock` for it so tests can pin it.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The local calendar day of the machine running the shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn fixed_clock_never_moves() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let clock = FixedClock(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.today(), day);
    }

    #[test]
    fn system_clock_is_within_a_day_of_utc() {
        let local = SystemClock.today();
        let utc = Utc::now().date_naive();
        assert!((local - utc).num_days().abs() <= 1);
    }
}
