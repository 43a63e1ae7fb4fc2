//! Read-only records the projection engine computes over.

pub mod category;
pub mod common;
pub mod subscription;

pub use category::Category;
pub use common::{Amounted, BelongsToCategory, Displayable, Identifiable, NamedEntity};
pub use subscription::Subscription;
