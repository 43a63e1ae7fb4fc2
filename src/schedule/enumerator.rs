//! Lazy enumeration of the charge dates a subscription produces inside a window.

use chrono::NaiveDate;

use super::align::align_with_step;
use super::cycle::CycleStep;
use super::window::DateWindow;
use crate::domain::Subscription;

/// Upper bound on cursor advances per enumeration.
pub const MAX_ITERATIONS: usize = 1000;

/// Finite, ascending sequence of charge dates for one subscription.
///
/// Cloning yields an independent cursor, so a sequence can be replayed.
#[derive(Debug, Clone)]
pub struct PaymentDates {
    step: CycleStep,
    cursor: Option<NaiveDate>,
    range_start: NaiveDate,
    range_end: NaiveDate,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    iterations: usize,
}

impl PaymentDates {
    fn empty(step: CycleStep, range_start: NaiveDate, range_end: NaiveDate) -> Self {
        Self {
            step,
            cursor: None,
            range_start,
            range_end,
            start_date: None,
            end_date: None,
            iterations: 0,
        }
    }
}

impl Iterator for PaymentDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let cursor = self.cursor?;
            if cursor > self.range_end {
                self.cursor = None;
                return None;
            }
            if self.iterations >= MAX_ITERATIONS {
                tracing::debug!(
                    range_start = %self.range_start,
                    range_end = %self.range_end,
                    "payment enumeration stopped at iteration cap"
                );
                self.cursor = None;
                return None;
            }
            self.iterations += 1;

            let following = self.step.next(cursor);
            self.cursor = following;

            let mut payment = cursor;
            if let Some(start) = self.start_date {
                if cursor < start {
                    // Activation counts as a charge only when the regular schedule
                    // would jump over it.
                    match following {
                        Some(next) if next > start => payment = start,
                        _ => continue,
                    }
                }
            }

            if self.end_date.is_some_and(|end| payment > end) {
                continue;
            }
            if payment < self.range_start || payment > self.range_end {
                continue;
            }
            return Some(payment);
        }
    }
}

/// Charge dates of `subscription` inside `[range_start, range_end]`.
///
/// Never fails: a missing anchor, an inverted range, or a walk that leaves
/// chrono's date range all produce an empty sequence.
pub fn payments_in_range(
    subscription: &Subscription,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> PaymentDates {
    let step = subscription.step();
    if range_start > range_end {
        return PaymentDates::empty(step, range_start, range_end);
    }
    // Without a stored next payment date the subscription has nothing scheduled.
    if subscription.next_payment_date.is_none() {
        return PaymentDates::empty(step, range_start, range_end);
    }
    let Some(anchor) = subscription.anchor_date() else {
        return PaymentDates::empty(step, range_start, range_end);
    };

    PaymentDates {
        step,
        cursor: align_with_step(anchor, range_start, step),
        range_start,
        range_end,
        start_date: subscription.start_date,
        end_date: subscription.end_date,
        iterations: 0,
    }
}

/// [`payments_in_range`] over a [`DateWindow`].
pub fn payments_in_window(subscription: &Subscription, window: &DateWindow) -> PaymentDates {
    payments_in_range(subscription, window.start, window.end)
}

/// Invokes `on_occurrence` for every charge date in `[range_start, range_end]`.
pub fn for_each_in_range<F>(
    subscription: &Subscription,
    range_start: NaiveDate,
    range_end: NaiveDate,
    on_occurrence: F,
) where
    F: FnMut(NaiveDate),
{
    payments_in_range(subscription, range_start, range_end).for_each(on_occurrence);
}
