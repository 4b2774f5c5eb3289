//! Reference store for Redkit
//!
//! This crate executes [`redkit_core::Command`]s against an in-process
//! keyspace with Redis semantics:
//! - MemoryStore: the store itself, one lock per command
//! - Keyspace: typed access to stored values with lazy expiry
//! - TTLIndex: deadline index used for active expiry
//! - ExpiryCleaner: optional background purge thread
//!
//! It stands in for a remote store in tests and in embedded use. The
//! routing flags passed with each command are recorded but do not change
//! behavior: there is only one node.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cleaner;
pub mod handlers;
pub mod keyspace;
pub mod store;
pub mod stored_value;
pub mod ttl;

pub use cleaner::ExpiryCleaner;
pub use keyspace::Keyspace;
pub use store::MemoryStore;
pub use stored_value::{SortedSet, StoredValue};
pub use ttl::TTLIndex;
