pub mod dashboard_service;
pub mod summary_service;

pub use dashboard_service::{DashboardService, DashboardStatistics, TopSubscription};
pub use summary_service::{CategorySpend, SummaryService, DEFAULT_UPCOMING_DAYS};
