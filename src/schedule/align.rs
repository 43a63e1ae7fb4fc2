//! Aligns an anchor date to the first cycle occurrence inside a window.

use chrono::NaiveDate;

use super::cycle::{resolve, CycleStep};

/// Returns the earliest date reachable from `anchor` by whole steps of `cycle`
/// that falls on or after `window_start`.
///
/// `None` means the walk left chrono's representable range.
pub fn align(anchor: NaiveDate, window_start: NaiveDate, cycle: &str) -> Option<NaiveDate> {
    align_with_step(anchor, window_start, resolve(cycle))
}

/// Same as [`align`] for an already resolved step.
///
/// Jumps the bulk of the gap in one calendar operation, then corrects with single
/// steps. The bulk estimate never overshoots, so the correction is at most a couple
/// of steps regardless of how far apart the dates are.
pub fn align_with_step(
    anchor: NaiveDate,
    window_start: NaiveDate,
    step: CycleStep,
) -> Option<NaiveDate> {
    let mut cursor = anchor;

    if cursor < window_start {
        let steps = step.whole_steps_between(cursor, window_start);
        if steps > 0 {
            cursor = step.advance(cursor, steps)?;
        }
        while cursor < window_start {
            cursor = step.next(cursor)?;
        }
    } else if cursor > window_start {
        let steps = step.whole_steps_between(window_start, cursor);
        if steps > 0 {
            cursor = step.advance(cursor, -steps)?;
        }
        while cursor > window_start {
            cursor = step.previous(cursor)?;
        }
        if cursor < window_start {
            cursor = step.next(cursor)?;
        }
    }

    Some(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_on_window_start_is_unchanged() {
        assert_eq!(
            align(date(2025, 1, 1), date(2025, 1, 1), "quarterly"),
            Some(date(2025, 1, 1))
        );
    }

    #[test]
    fn walks_forward_over_long_gaps() {
        assert_eq!(
            align(date(2015, 3, 15), date(2025, 1, 1), "monthly"),
            Some(date(2025, 1, 15))
        );
        assert_eq!(
            align(date(2020, 1, 1), date(2025, 1, 2), "daily"),
            Some(date(2025, 1, 2))
        );
        assert_eq!(
            align(date(2024, 12, 30), date(2025, 1, 1), "weekly"),
            Some(date(2025, 1, 6))
        );
    }

    #[test]
    fn walks_backward_to_first_occurrence_in_window() {
        assert_eq!(
            align(date(2025, 1, 15), date(2025, 1, 1), "monthly"),
            Some(date(2025, 1, 15))
        );
        assert_eq!(
            align(date(2025, 3, 10), date(2025, 1, 1), "monthly"),
            Some(date(2025, 1, 10))
        );
        assert_eq!(
            align(date(2030, 7, 1), date(2025, 2, 1), "quarterly"),
            Some(date(2025, 4, 1))
        );
        assert_eq!(
            align(date(2031, 6, 1), date(2025, 6, 1), "yearly"),
            Some(date(2025, 6, 1))
        );
    }

    #[test]
    fn forward_alignment_handles_month_end_anchor() {
        // Jan 31 bulk-jumps one month to Feb 28, then single steps clamp from there.
        assert_eq!(
            align(date(2025, 1, 31), date(2025, 3, 1), "monthly"),
            Some(date(2025, 3, 28))
        );
    }

    #[test]
    fn result_is_never_before_window_start() {
        let start = date(2025, 5, 17);
        for cycle in ["daily", "weekly", "monthly", "quarterly", "yearly", "bogus"] {
            for anchor in [date(2019, 1, 31), date(2025, 5, 16), date(2033, 8, 30)] {
                let aligned = align(anchor, start, cycle).unwrap();
                assert!(aligned >= start, "{cycle} from {anchor} gave {aligned}");
                let previous = resolve(cycle).previous(aligned).unwrap();
                assert!(previous < start, "{cycle} from {anchor} is not earliest");
            }
        }
    }

    #[test]
    fn overflowing_anchor_yields_none() {
        let near_end = NaiveDate::MAX.checked_sub_days(chrono::Days::new(10)).unwrap();
        assert_eq!(align(near_end, NaiveDate::MAX, "monthly"), None);
    }
}
