//! Change tracking: in-memory trackers and owned, change-tracked collections.

pub mod collection;
pub mod in_memory_tracker;

pub use collection::ChildList;
pub use in_memory_tracker::InMemoryChangeTracker;
