use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::summary_service::SummaryService;
use crate::domain::Subscription;
use crate::schedule::{BillingCycle, DateWindow};
use crate::utils::round_cents;

pub const DEFAULT_TOP_LIMIT: usize = 5;

/// A subscription ranked by what it costs in the current month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSubscription {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
    pub month_amount: f64,
}

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatistics {
    pub total_subscriptions: usize,
    pub monthly_average: f64,
    pub next_month_total: f64,
    pub next_30_days_total: f64,
    pub current_month_paid: f64,
    pub current_month_total: f64,
    pub current_month_remaining: f64,
    /// Percent of the current month's total already charged.
    pub current_month_progress: f64,
    pub last_month_total: f64,
    pub month_over_month_change: f64,
    pub month_over_month_change_percent: f64,
    pub top_subscriptions: Vec<TopSubscription>,
}

pub struct DashboardService;

impl DashboardService {
    pub fn statistics(
        subscriptions: &[Subscription],
        today: NaiveDate,
        top_limit: usize,
    ) -> DashboardStatistics {
        let this_month = DateWindow::month_of(today);
        let last_month = this_month.previous_month();

        let current_month_total = SummaryService::range_total(subscriptions, this_month);
        let current_month_paid: f64 = SummaryService::charges(subscriptions, this_month)
            .filter(|(_, date)| *date <= today)
            .map(|(sub, _)| sub.amount)
            .sum();
        let last_month_total = SummaryService::range_total(subscriptions, last_month);
        let change = current_month_total - last_month_total;

        DashboardStatistics {
            total_subscriptions: subscriptions.len(),
            monthly_average: round_cents(SummaryService::monthly_average(subscriptions)),
            next_month_total: round_cents(SummaryService::next_month_total(subscriptions, today)),
            next_30_days_total: round_cents(SummaryService::next_30_days_total(subscriptions, today)),
            current_month_paid: round_cents(current_month_paid),
            current_month_total: round_cents(current_month_total),
            current_month_remaining: round_cents(current_month_total - current_month_paid),
            current_month_progress: percent(current_month_paid, current_month_total),
            last_month_total: round_cents(last_month_total),
            month_over_month_change: round_cents(change),
            month_over_month_change_percent: percent(change, last_month_total),
            top_subscriptions: Self::top_subscriptions(subscriptions, today, top_limit),
        }
    }

    /// Up to `limit` subscriptions that have not ended, most expensive this month first.
    pub fn top_subscriptions(
        subscriptions: &[Subscription],
        today: NaiveDate,
        limit: usize,
    ) -> Vec<TopSubscription> {
        let this_month = DateWindow::month_of(today);
        let mut ranked: Vec<TopSubscription> = subscriptions
            .iter()
            .filter(|sub| !sub.has_ended(today))
            .map(|sub| TopSubscription {
                id: sub.id,
                name: sub.name.clone(),
                amount: sub.amount,
                cycle: sub.cycle,
                month_amount: round_cents(SummaryService::range_total(
                    std::slice::from_ref(sub),
                    this_month,
                )),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.month_amount
                .partial_cmp(&a.month_amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(limit);
        ranked
    }
}

/// `part / whole` as a percentage with two decimals; 0 when `whole` is not positive.
fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        round_cents(part / whole * 100.0)
    } else {
        0.0
    }
}
