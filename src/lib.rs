#![doc(test(attr(deny(warnings))))]

//! Subcycle projects recurring subscription charges onto calendar windows and
//! derives the summaries a subscription dashboard shows: category spend, range
//! totals, monthly averages, and upcoming-charge notifications.
//!
//! ```
//! use chrono::NaiveDate;
//! use subcycle_core::domain::Subscription;
//! use subcycle_core::schedule::{payments_in_range, BillingCycle};
//!
//! let day = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
//! let sub = Subscription::new("Music", 9.99, BillingCycle::Monthly, day(1, 31));
//! let dates: Vec<_> = payments_in_range(&sub, day(2, 1), day(4, 30)).collect();
//! assert_eq!(dates, vec![day(2, 28), day(3, 28), day(4, 28)]);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod schedule;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Subcycle tracing initialized.");
    });
}
