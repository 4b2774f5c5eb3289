//! Test modules for the executor crate.

pub mod item;

use std::sync::Arc;

use redkit_storage::MemoryStore;

use crate::Redkit;

/// A JSON facade over a fresh store, plus the store for inspection.
pub(crate) fn create_test_redkit() -> (Redkit, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new().with_command_log());
    (Redkit::new(Arc::clone(&store)), store)
}
