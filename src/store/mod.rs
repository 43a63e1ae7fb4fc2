//! Adapter between the external subscription store and the engine.

pub mod record;
pub mod snapshot;

pub use record::SubscriptionRecord;
pub use snapshot::{Snapshot, SnapshotFile};
