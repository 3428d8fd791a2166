//! GridTrack storage layer.
//!
//! The [`TaskStore`] port is what a surrounding service implements over its
//! document store; [`MemoryStore`] is an in-memory adapter with the same
//! raw-document marshaling a real backend would have, used by tests and
//! embeddings that need no persistence.

pub mod docs;
pub mod error;
pub mod memory;
pub mod store;

pub use docs::{JobDoc, TaskDoc};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::TaskStore;
