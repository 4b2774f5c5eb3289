//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any test's main.rs.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use redkit::{MemoryStore, MessagePackSerializer, Redkit};
use serde::{Deserialize, Serialize};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so it only shows for
/// failing tests.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// JSON facade over a fresh store that logs every command.
pub fn redkit() -> (Redkit, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new().with_command_log());
    (Redkit::new(Arc::clone(&store)), store)
}

/// MessagePack facade over a fresh store.
pub fn redkit_msgpack() -> (Redkit<MessagePackSerializer>, Arc<MemoryStore>) {
    let (redkit, store) = redkit();
    (redkit.with_serializer(MessagePackSerializer), store)
}

/// A structured value used across suites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    pub customer: String,
    pub lines: Vec<String>,
    pub total_cents: i64,
    pub note: Option<String>,
}

impl Invoice {
    pub fn sample(id: u64) -> Self {
        Invoice {
            id,
            customer: format!("customer-{}", id),
            lines: vec!["widget".to_string(), "gadget".to_string()],
            total_cents: 1250 * id as i64,
            note: None,
        }
    }
}
