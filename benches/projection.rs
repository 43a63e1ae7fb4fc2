use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use subcycle_core::core::services::{DashboardService, SummaryService};
use subcycle_core::domain::{Category, Subscription};
use subcycle_core::schedule::{align, payments_in_range, BillingCycle, DateWindow};
use subcycle_core::store::Snapshot;
use tempfile::tempdir;

fn build_sample(count: usize) -> (Vec<Subscription>, Vec<Category>) {
    let categories = Category::defaults();
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    let subscriptions = (0..count)
        .map(|idx| {
            let cycle = BillingCycle::ALL[idx % BillingCycle::ALL.len()];
            let next = start + Duration::days((idx % 1500) as i64);
            let mut sub = Subscription::new(format!("Sub {idx}"), 5.0 + (idx % 40) as f64, cycle, next)
                .with_category(categories[idx % categories.len()].id);
            if idx % 4 == 0 {
                sub = sub.with_start_date(next - Duration::days(45)).including_history();
            }
            sub
        })
        .collect();
    (subscriptions, categories)
}

fn bench_alignment(c: &mut Criterion) {
    let anchor = NaiveDate::from_ymd_opt(1990, 1, 31).unwrap();
    let window_start = NaiveDate::from_ymd_opt(2090, 6, 1).unwrap();

    c.bench_function("align_monthly_century_gap", |b| {
        b.iter(|| align(black_box(anchor), black_box(window_start), "monthly"))
    });
}

fn bench_enumeration(c: &mut Criterion) {
    let sub = Subscription::new(
        "Daily",
        1.0,
        BillingCycle::Daily,
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    );
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2049, 12, 31).unwrap();

    c.bench_function("enumerate_daily_to_cap", |b| {
        b.iter(|| payments_in_range(black_box(&sub), start, end).count())
    });
}

fn bench_aggregates(c: &mut Criterion) {
    let (subs, categories) = build_sample(black_box(1_000));
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    c.bench_function("month_distribution_1k", |b| {
        b.iter(|| SummaryService::month_distribution(&subs, &categories, today))
    });

    c.bench_function("dashboard_statistics_1k", |b| {
        b.iter(|| DashboardService::statistics(&subs, today, 5))
    });

    let year = DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
    .unwrap();
    c.bench_function("range_total_year_1k", |b| {
        b.iter(|| SummaryService::range_total(&subs, year))
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let (subs, categories) = build_sample(black_box(5_000));
    let snapshot = Snapshot::new(subs, categories);
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");

    c.bench_function("snapshot_save_5k", |b| {
        b.iter(|| snapshot.save(&path).expect("save snapshot"))
    });

    snapshot.save(&path).expect("prepare snapshot");
    c.bench_function("snapshot_load_5k", |b| {
        b.iter_batched(
            || path.clone(),
            |path| Snapshot::load(&path).expect("load snapshot"),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_alignment,
    bench_enumeration,
    bench_aggregates,
    bench_snapshot_io
);
criterion_main!(benches);
