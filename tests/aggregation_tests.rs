mod common;

use common::{date, SNAPSHOT_JSON};
use subcycle_core::{
    core::{
        services::{DashboardService, SummaryService, DEFAULT_UPCOMING_DAYS},
        ReadState,
    },
    domain::{Category, Subscription},
    schedule::{BillingCycle, DateWindow},
    store::Snapshot,
};

fn close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

fn names(subs: Vec<&Subscription>) -> Vec<&str> {
    subs.into_iter().map(|sub| sub.name.as_str()).collect()
}

#[test]
fn category_without_charges_is_absent() {
    let streaming = Category::new("Streaming", "#EF4444", 1);
    let idle = Category::new("Idle", "#10B981", 2);
    let subs = vec![
        Subscription::new("Video", 10.0, BillingCycle::Monthly, date(2025, 5, 4))
            .with_category(streaming.id),
        Subscription::new("Annual", 50.0, BillingCycle::Yearly, date(2025, 9, 1))
            .with_category(idle.id),
    ];
    let distribution = SummaryService::month_distribution(
        &subs,
        &[streaming.clone(), idle.clone()],
        date(2025, 5, 20),
    );
    assert_eq!(distribution.len(), 1);
    assert_eq!(distribution[0].category_id, streaming.id);
    assert!(distribution.iter().all(|entry| entry.category_id != idle.id));
}

#[test]
fn snapshot_month_views() {
    let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
    let subs = &snapshot.subscriptions;
    let today = date(2025, 3, 10);

    // Netflix, Notion, Phone on the 5th, Newsletter on five Mondays.
    close(SummaryService::month_total(subs, today), 151.49);
    // Notion is yearly and does not recur in April.
    close(SummaryService::next_month_total(subs, today), 53.49);
    close(SummaryService::monthly_average(subs), 55.49);

    let distribution = SummaryService::month_distribution(subs, &snapshot.categories, today);
    let labels: Vec<&str> = distribution.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(labels, vec!["Entertainment", "Productivity", "Utilities & Telecom"]);
    close(distribution.iter().map(|entry| entry.amount).sum(), 141.49);
}

#[test]
fn totals_are_never_negative() {
    let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
    let mut start = date(2024, 1, 1);
    while start < date(2027, 1, 1) {
        let window = DateWindow::month_of(start);
        assert!(SummaryService::range_total(&snapshot.subscriptions, window) >= 0.0);
        start = window.next_month().start;
    }
    assert!(SummaryService::monthly_average(&snapshot.subscriptions) >= 0.0);
    assert_eq!(SummaryService::range_total(&[], DateWindow::month_of(start)), 0.0);
}

#[test]
fn upcoming_overdue_and_unread() {
    let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
    let subs = &snapshot.subscriptions;
    let today = date(2025, 3, 10);

    assert_eq!(
        names(SummaryService::upcoming(subs, today, DEFAULT_UPCOMING_DAYS)),
        vec!["Netflix"]
    );
    assert_eq!(
        names(SummaryService::upcoming(subs, today, 14)),
        vec!["Netflix", "Notion"]
    );
    assert_eq!(names(SummaryService::overdue(subs, today)), vec!["Phone", "Newsletter"]);

    let mut read = ReadState::new();
    assert!(read.mark_read(snapshot.find("netflix").unwrap().id));
    assert!(!read.mark_read(snapshot.find("netflix").unwrap().id));
    assert!(SummaryService::unread_upcoming(subs, today, DEFAULT_UPCOMING_DAYS, &read).is_empty());
    read.clear();
    assert_eq!(
        SummaryService::unread_upcoming(subs, today, DEFAULT_UPCOMING_DAYS, &read).len(),
        1
    );
}

#[test]
fn dashboard_over_snapshot() {
    let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
    let stats = DashboardService::statistics(&snapshot.subscriptions, date(2025, 3, 10), 3);

    assert_eq!(stats.total_subscriptions, 4);
    assert_eq!(stats.current_month_total, 151.49);
    // Phone on the 5th, Newsletter on the 3rd and 10th.
    assert_eq!(stats.current_month_paid, 34.0);
    assert_eq!(stats.current_month_remaining, 117.49);
    assert_eq!(stats.last_month_total, 53.49);
    assert_eq!(stats.month_over_month_change, 98.0);
    assert_eq!(stats.next_month_total, 53.49);

    let top: Vec<&str> = stats.top_subscriptions.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(top, vec!["Notion", "Phone", "Netflix"]);

    let json = serde_json::to_value(&stats).unwrap();
    assert!(json.get("currentMonthProgress").is_some());
    assert!(json.get("topSubscriptions").is_some());
}
