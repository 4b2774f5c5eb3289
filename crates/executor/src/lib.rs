//! # Redkit Executor
//!
//! The typed facade over a Redis-style key-value store.
//!
//! This is the only crate users need to import. It provides:
//! - [`Redkit`] - typed operations for strings, lists, sets, sorted sets and hashes
//! - [`Serializer`] - the pluggable payload encoding (JSON or MessagePack)
//! - [`RedkitConfig`] - `redkit.toml` configuration
//! - [`Command`]/[`Output`] - the primitive instruction set a store executes
//!
//! ## Quick Start
//!
//! ```
//! use redkit_executor::{Order, Redkit};
//! use redkit_storage::MemoryStore;
//!
//! let redkit = Redkit::new(MemoryStore::shared());
//!
//! redkit.sorted_set_add("leaders", "ada", 3.0).unwrap();
//! redkit.sorted_set_add("leaders", "bob", 1.0).unwrap();
//! let top: Vec<String> = redkit.sorted_set_get_page("leaders", 1, 10, Order::Descending).unwrap();
//! assert_eq!(top, vec!["ada", "bob"]);
//! ```
//!
//! ## Families
//!
//! | Family | Prefix | Store kind |
//! |--------|--------|------------|
//! | **Item** | `item_`, `increment`, `decrement` | string |
//! | **Keys** | `key_` | any |
//! | **List** | `list_` | list |
//! | **Set** | `set_` | set |
//! | **SortedSet** | `sorted_set_` | sorted set |
//! | **Hash** | `hash_` | hash |
//!
//! ## Null and absent values
//!
//! A null value is stored as an empty payload and an empty or missing
//! payload reads back as `T::default()`. Storing `None` and never storing
//! anything look the same to a reader.

#![warn(missing_docs)]

mod api;
pub mod config;
pub mod guard;
pub mod serialize;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::{Redkit, ScoreRange, SetOptions};
pub use config::{RedkitConfig, RoutingPolicy, SerializerKind, CONFIG_FILE_NAME};
pub use serialize::{
    from_payload, to_payload, ConfiguredSerializer, JsonSerializer, MessagePackSerializer,
    Serializer,
};

// Re-export the shared vocabulary so users don't need redkit-core directly
pub use redkit_core::{
    Aggregate, Command, CommandFlags, Connection, ConnectionProvider, Error, Exclude, Expiry,
    HashEntry, InsertPosition, KeyType, ListSide, Order, Output, Payload, Result, SetOperation,
    SortedSetEntry, When,
};
