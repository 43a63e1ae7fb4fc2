//! Tracks which upcoming-charge notifications a user has already seen.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Identifiable;
use crate::errors::SubcycleError;

/// Set of subscription ids marked as seen.
///
/// Plain in-memory state; the store persists it as an opaque blob between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadState {
    #[serde(default)]
    seen: BTreeSet<Uuid>,
}

impl ReadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as seen. Returns `false` when it already was.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        self.seen.insert(id)
    }

    pub fn is_read(&self, id: Uuid) -> bool {
        self.seen.contains(&id)
    }

    /// The entries of `upcoming` that have not been marked as seen, in their
    /// original order.
    pub fn unread_upcoming<'a, T, I>(&self, upcoming: I) -> Vec<&'a T>
    where
        T: Identifiable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        upcoming
            .into_iter()
            .filter(|entry| !self.seen.contains(&entry.id()))
            .collect()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn to_blob(&self) -> Result<String, SubcycleError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_blob(blob: &str) -> Result<Self, SubcycleError> {
        if blob.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(blob)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subscription;
    use crate::schedule::BillingCycle;
    use chrono::NaiveDate;

    fn sub(name: &str) -> Subscription {
        Subscription::new(
            name,
            5.0,
            BillingCycle::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
    }

    #[test]
    fn mark_read_is_idempotent() {
        let mut state = ReadState::new();
        let id = Uuid::new_v4();
        assert!(state.mark_read(id));
        assert!(!state.mark_read(id));
        assert_eq!(state.len(), 1);
        assert!(state.is_read(id));
    }

    #[test]
    fn unread_filters_seen_entries_and_keeps_order() {
        let upcoming = vec![sub("a"), sub("b"), sub("c")];
        let mut state = ReadState::new();
        state.mark_read(upcoming[1].id);
        let unread = state.unread_upcoming(&upcoming);
        let names: Vec<&str> = unread.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn clear_empties_everything() {
        let mut state = ReadState::new();
        state.mark_read(Uuid::new_v4());
        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn blob_round_trip_and_empty_blob() {
        let mut state = ReadState::new();
        state.mark_read(Uuid::new_v4());
        let restored = ReadState::from_blob(&state.to_blob().unwrap()).unwrap();
        assert_eq!(restored, state);
        assert!(ReadState::from_blob("  ").unwrap().is_empty());
        assert!(ReadState::from_blob("not json").is_err());
    }
}
