//! Moves stale next-payment dates forward to the current cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cycle::resolve;
use super::window::days_after;
use crate::domain::Subscription;

/// Outcome of rolling a subscription's next payment date forward.
///
/// The engine never mutates subscriptions; the store applies these results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rollover {
    Unchanged,
    Advanced { from: NaiveDate, to: NaiveDate },
    /// The next charge would fall after the termination date; `last_due` is the
    /// last charge inside the term.
    Expired { last_due: NaiveDate },
}

impl Rollover {
    pub fn is_change(&self) -> bool {
        !matches!(self, Rollover::Unchanged)
    }
}

/// How a scheduled date relates to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledStatus {
    Overdue,
    Pending,
    Future,
}

impl ScheduledStatus {
    /// `Overdue` before `reference`, `Pending` up to `pending_days` after it,
    /// `Future` beyond that.
    pub fn classify(scheduled: NaiveDate, reference: NaiveDate, pending_days: i64) -> Self {
        if scheduled < reference {
            return ScheduledStatus::Overdue;
        }
        let pending_cutoff = days_after(reference, pending_days);
        if scheduled <= pending_cutoff {
            ScheduledStatus::Pending
        } else {
            ScheduledStatus::Future
        }
    }
}

/// Date one billing step after `date` for the given cycle label.
pub fn next_payment_after(date: NaiveDate, cycle: &str) -> Option<NaiveDate> {
    resolve(cycle).next(date)
}

/// Rolls `subscription`'s next payment date forward until it is not before `today`.
///
/// Steps one cycle at a time from the previous date, so month-end clamping
/// accumulates (Jan 31 -> Feb 28 -> Mar 28).
pub fn roll_forward(subscription: &Subscription, today: NaiveDate) -> Rollover {
    let Some(current) = subscription.next_payment_date else {
        return Rollover::Unchanged;
    };
    let step = subscription.step();
    let mut cursor = current;
    while cursor < today {
        let Some(candidate) = step.next(cursor).filter(|next| *next > cursor) else {
            return Rollover::Unchanged;
        };
        if subscription.end_date.is_some_and(|end| candidate > end) {
            tracing::debug!(subscription = %subscription.id, last_due = %cursor, "subscription expired");
            return Rollover::Expired { last_due: cursor };
        }
        cursor = candidate;
    }
    if cursor == current {
        return Rollover::Unchanged;
    }
    Rollover::Advanced {
        from: current,
        to: cursor,
    }
}

/// Rollover outcomes for every subscription that needs a change.
pub fn roll_forward_all(subscriptions: &[Subscription], today: NaiveDate) -> Vec<(Uuid, Rollover)> {
    let changes: Vec<(Uuid, Rollover)> = subscriptions
        .iter()
        .map(|sub| (sub.id, roll_forward(sub, today)))
        .filter(|(_, outcome)| outcome.is_change())
        .collect();
    if !changes.is_empty() {
        tracing::info!(count = changes.len(), %today, "rolled subscriptions to next cycle");
    }
    changes
}
