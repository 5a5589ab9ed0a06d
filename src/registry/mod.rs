//! Bookkeeping for hosts that re-project as their layout source changes.

mod cache;
mod core;

pub use self::cache::{PlacementCache, fingerprint};
pub use self::core::PlacementRegistry;
