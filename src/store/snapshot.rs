use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::record::SubscriptionRecord;
use crate::domain::{Category, Identifiable, NamedEntity, Subscription};
use crate::errors::SubcycleError;
use crate::schedule::Rollover;
use crate::utils::persistence::{load_json, save_json};

/// On-disk shape of an exported store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile {
    #[serde(default)]
    pub subscriptions: Vec<SubscriptionRecord>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Normalized subscriptions and categories the engine computes over.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub subscriptions: Vec<Subscription>,
    pub categories: Vec<Category>,
}

impl Snapshot {
    pub fn new(subscriptions: Vec<Subscription>, categories: Vec<Category>) -> Self {
        Self {
            subscriptions,
            categories,
        }
    }

    /// Converts raw records, seeding the default categories when none exist.
    pub fn from_file(file: SnapshotFile) -> Result<Self, SubcycleError> {
        let subscriptions = file
            .subscriptions
            .into_iter()
            .map(SubscriptionRecord::into_subscription)
            .collect::<Result<Vec<_>, _>>()?;
        let categories = if file.categories.is_empty() {
            Category::defaults()
        } else {
            file.categories
        };
        Ok(Self::new(subscriptions, categories))
    }

    pub fn from_json(json: &str) -> Result<Self, SubcycleError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn load(path: &Path) -> Result<Self, SubcycleError> {
        let file: SnapshotFile = load_json(path)?;
        let snapshot = Self::from_file(file)?;
        tracing::info!(
            path = %path.display(),
            subscriptions = snapshot.subscriptions.len(),
            categories = snapshot.categories.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), SubcycleError> {
        let file = SnapshotFile {
            subscriptions: self.subscriptions.iter().map(SubscriptionRecord::from).collect(),
            categories: self.categories.clone(),
        };
        save_json(&file, path)
    }

    /// Finds a subscription by exact id, id prefix, or case-insensitive name.
    pub fn find(&self, needle: &str) -> Result<&Subscription, SubcycleError> {
        let needle = needle.trim();
        if let Ok(id) = Uuid::parse_str(needle) {
            if let Some(sub) = self.subscriptions.iter().find(|sub| sub.id() == id) {
                return Ok(sub);
            }
        }
        let matches: Vec<&Subscription> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.name_matches(needle) || sub.id_starts_with(needle))
            .collect();
        match matches.as_slice() {
            [single] => Ok(*single),
            [] => Err(SubcycleError::InvalidReference(format!(
                "no subscription matches `{needle}`"
            ))),
            _ => Err(SubcycleError::InvalidReference(format!(
                "`{needle}` matches {} subscriptions",
                matches.len()
            ))),
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|cat| cat.id() == id)
    }

    /// Replaces next payment dates according to rollover outcomes; expired
    /// subscriptions lose their next payment date.
    pub fn apply_rollovers(&mut self, changes: &[(Uuid, Rollover)]) {
        for (id, outcome) in changes {
            let Some(sub) = self.subscriptions.iter_mut().find(|sub| sub.id == *id) else {
                continue;
            };
            match outcome {
                Rollover::Advanced { to, .. } => sub.next_payment_date = Some(*to),
                Rollover::Expired { .. } => sub.next_payment_date = None,
                Rollover::Unchanged => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{roll_forward_all, BillingCycle};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "subscriptions": [
            {"id": "0b6f3a52-6a57-4a0e-9d39-3c2d8f1e2a10", "name": "Netflix", "price": 390, "billingCycle": "monthly", "nextPaymentDate": "2025-12-15"},
            {"name": "Spotify", "amount": 149, "cycle": "monthly", "nextPaymentDate": "2025-12-10"}
        ]
    }"#;

    #[test]
    fn seeds_default_categories() {
        let snapshot = Snapshot::from_json(SAMPLE).unwrap();
        assert_eq!(snapshot.subscriptions.len(), 2);
        assert_eq!(snapshot.categories.len(), 5);
    }

    #[test]
    fn find_by_name_prefix_and_id() {
        let snapshot = Snapshot::from_json(SAMPLE).unwrap();
        assert_eq!(snapshot.find("spotify").unwrap().name, "Spotify");
        assert_eq!(snapshot.find("0b6f3a52").unwrap().name, "Netflix");
        assert_eq!(
            snapshot
                .find("0b6f3a52-6a57-4a0e-9d39-3c2d8f1e2a10")
                .unwrap()
                .name,
            "Netflix"
        );
        assert!(snapshot.find("hulu").is_err());
    }

    #[test]
    fn save_and_load_preserve_subscriptions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let snapshot = Snapshot::from_json(SAMPLE).unwrap();
        snapshot.save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded.subscriptions, snapshot.subscriptions);
        assert_eq!(loaded.categories, snapshot.categories);
    }

    #[test]
    fn apply_rollovers_updates_dates() {
        let mut snapshot = Snapshot::new(
            vec![Subscription::new(
                "Daily",
                1.0,
                BillingCycle::Daily,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )],
            Vec::new(),
        );
        let today = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let changes = roll_forward_all(&snapshot.subscriptions, today);
        snapshot.apply_rollovers(&changes);
        assert_eq!(snapshot.subscriptions[0].next_payment_date, Some(today));
    }
}
