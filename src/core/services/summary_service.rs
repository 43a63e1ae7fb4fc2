use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::ReadState;
use crate::domain::{Amounted, BelongsToCategory, Category, Subscription};
use crate::schedule::{days_after, payments_in_range, DateWindow, ScheduledStatus};

/// Days ahead covered by the upcoming-charge list unless configured otherwise.
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;
const NEXT_30_DAYS: i64 = 30;

/// Spend attributed to one category within a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category_id: Uuid,
    pub name: String,
    pub color: String,
    pub amount: f64,
}

/// Read-only aggregate views over a subscription snapshot.
///
/// Every window-based figure is folded from the same charge enumeration, so the
/// distribution, the month totals, and the dashboard agree on what a month costs.
pub struct SummaryService;

impl SummaryService {
    /// Every `(subscription, charge date)` pair inside `window`.
    pub fn charges(
        subscriptions: &[Subscription],
        window: DateWindow,
    ) -> impl Iterator<Item = (&Subscription, NaiveDate)> + '_ {
        subscriptions.iter().flat_map(move |sub| {
            payments_in_range(sub, window.start, window.end).map(move |date| (sub, date))
        })
    }

    /// Sum of every charge inside `window`; a subscription charged twice counts twice.
    pub fn range_total(subscriptions: &[Subscription], window: DateWindow) -> f64 {
        Self::charges(subscriptions, window)
            .map(|(sub, _)| sub.amount)
            .sum()
    }

    pub fn month_total(subscriptions: &[Subscription], today: NaiveDate) -> f64 {
        Self::range_total(subscriptions, DateWindow::month_of(today))
    }

    pub fn next_month_total(subscriptions: &[Subscription], today: NaiveDate) -> f64 {
        Self::range_total(subscriptions, DateWindow::month_of(today).next_month())
    }

    /// Spend per category inside `window`, in category sort order.
    ///
    /// Subscriptions without a known category are ignored and categories with no
    /// spend are left out.
    pub fn category_distribution(
        subscriptions: &[Subscription],
        categories: &[Category],
        window: DateWindow,
    ) -> Vec<CategorySpend> {
        let mut totals: HashMap<Uuid, f64> = HashMap::new();
        for (sub, _) in Self::charges(subscriptions, window) {
            let Some(category_id) = sub.category_id() else {
                continue;
            };
            if categories.iter().any(|cat| cat.id == category_id) {
                *totals.entry(category_id).or_default() += sub.amount();
            }
        }

        let mut ordered: Vec<&Category> = categories.iter().collect();
        ordered.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        ordered
            .into_iter()
            .filter_map(|cat| {
                let amount = totals.get(&cat.id).copied().unwrap_or(0.0);
                (amount > 0.0).then(|| CategorySpend {
                    category_id: cat.id,
                    name: cat.name.clone(),
                    color: cat.color.clone(),
                    amount,
                })
            })
            .collect()
    }

    /// Category distribution for the calendar month containing `today`.
    pub fn month_distribution(
        subscriptions: &[Subscription],
        categories: &[Category],
        today: NaiveDate,
    ) -> Vec<CategorySpend> {
        Self::category_distribution(subscriptions, categories, DateWindow::month_of(today))
    }

    /// Steady-state monthly cost: quarterly amounts divided by 3, yearly by 12,
    /// everything else counted as-is.
    pub fn monthly_average(subscriptions: &[Subscription]) -> f64 {
        subscriptions.iter().map(Subscription::monthly_amount).sum()
    }

    /// Subscriptions whose stored next payment date lies strictly between `today`
    /// and `today + days`, soonest first.
    pub fn upcoming(subscriptions: &[Subscription], today: NaiveDate, days: i64) -> Vec<&Subscription> {
        let horizon = days_after(today, days);
        let mut upcoming: Vec<&Subscription> = subscriptions
            .iter()
            .filter(|sub| {
                sub.next_payment_date
                    .is_some_and(|date| date > today && date < horizon)
            })
            .collect();
        upcoming.sort_by(|a, b| {
            a.next_payment_date
                .cmp(&b.next_payment_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        upcoming
    }

    /// Upcoming entries the user has not marked as seen.
    pub fn unread_upcoming<'a>(
        subscriptions: &'a [Subscription],
        today: NaiveDate,
        days: i64,
        read_state: &ReadState,
    ) -> Vec<&'a Subscription> {
        read_state.unread_upcoming(Self::upcoming(subscriptions, today, days))
    }

    /// Subscriptions whose stored next payment date has already passed while the
    /// subscription was still running, oldest first.
    pub fn overdue(subscriptions: &[Subscription], today: NaiveDate) -> Vec<&Subscription> {
        let mut overdue: Vec<&Subscription> = subscriptions
            .iter()
            .filter(|sub| match sub.next_payment_date {
                Some(date) => {
                    ScheduledStatus::classify(date, today, DEFAULT_UPCOMING_DAYS)
                        == ScheduledStatus::Overdue
                        && sub.end_date.map_or(true, |end| date <= end)
                }
                None => false,
            })
            .collect();
        overdue.sort_by_key(|sub| sub.next_payment_date);
        overdue
    }

    /// Sum of stored next payments due strictly within the coming 30 days.
    pub fn next_30_days_total(subscriptions: &[Subscription], today: NaiveDate) -> f64 {
        Self::upcoming(subscriptions, today, NEXT_30_DAYS)
            .into_iter()
            .map(|sub| sub.amount)
            .sum()
    }
}
