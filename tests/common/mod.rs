#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use subcycle_core::config::ConfigManager;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const SNAPSHOT_JSON: &str = r##"{
    "categories": [
        {"id": "11111111-1111-4111-8111-111111111111", "name": "Entertainment", "color": "#EF4444", "sortOrder": 1},
        {"id": "22222222-2222-4222-8222-222222222222", "name": "Productivity", "color": "#3B82F6", "sortOrder": 2},
        {"id": "33333333-3333-4333-8333-333333333333", "name": "Utilities & Telecom", "color": "#F59E0B", "sortOrder": 3}
    ],
    "subscriptions": [
        {"id": "aaaaaaaa-0000-4000-8000-000000000001", "name": "Netflix", "price": 15.49, "billingCycle": "monthly",
         "nextPaymentDate": "2025-03-12", "categoryId": "11111111-1111-4111-8111-111111111111"},
        {"id": "bbbbbbbb-0000-4000-8000-000000000002", "name": "Notion", "amount": 96, "cycle": "yearly",
         "nextPaymentDate": "2025-03-20", "categoryId": "22222222-2222-4222-8222-222222222222"},
        {"id": "cccccccc-0000-4000-8000-000000000003", "name": "Phone", "amount": 30, "cycle": "monthly",
         "nextPaymentDate": "2025-01-05", "categoryId": "33333333-3333-4333-8333-333333333333"},
        {"id": "dddddddd-0000-4000-8000-000000000004", "name": "Newsletter", "amount": 2, "cycle": "weekly",
         "nextPaymentDate": "2025-03-03"}
    ]
}"##;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn setup_config_manager() -> ConfigManager {
    ConfigManager::with_base_dir(temp_base()).expect("create config manager for temp dir")
}

/// Writes the shared fixture to a fresh directory and returns its path.
pub fn write_snapshot() -> PathBuf {
    let path = temp_base().join("subscriptions.json");
    std::fs::write(&path, SNAPSHOT_JSON).expect("write snapshot fixture");
    path
}
