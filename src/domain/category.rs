//! Spending categories used to group subscriptions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Grouping label for subscriptions. Carries no behaviour beyond ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            icon: None,
            sort_order,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Seed set offered when the store has no categories yet.
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new("Entertainment", "#EF4444", 1).with_icon("play-circle"),
            Category::new("Productivity", "#3B82F6", 2).with_icon("briefcase"),
            Category::new("Lifestyle & Shopping", "#10B981", 3).with_icon("shopping-cart"),
            Category::new("Gaming & Social", "#8B5CF6", 4).with_icon("gamepad"),
            Category::new("Utilities & Telecom", "#F59E0B", 5).with_icon("bolt"),
        ]
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ordered_and_unique() {
        let defaults = Category::defaults();
        assert_eq!(defaults.len(), 5);
        let orders: Vec<i32> = defaults.iter().map(|c| c.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        let mut ids: Vec<Uuid> = defaults.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
