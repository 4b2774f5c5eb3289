//! Redkit - a typed facade over a Redis-style key-value store
//!
//! Redkit turns string keys and typed Rust values into the primitive
//! commands of a Redis-style store: strings and counters, lists, sets,
//! sorted sets and hashes. Values are encoded with a pluggable
//! [`Serializer`] (JSON by default, MessagePack optionally) and every
//! command carries routing flags chosen by a [`RoutingPolicy`].
//!
//! # Quick Start
//!
//! ```
//! use redkit::{MemoryStore, Redkit};
//!
//! let redkit = Redkit::new(MemoryStore::shared());
//!
//! redkit.item_set("user:123", "Alice").unwrap();
//! let name: String = redkit.item_get("user:123").unwrap();
//! assert_eq!(name, "Alice");
//!
//! assert_eq!(redkit.increment("visits").unwrap(), 1);
//! ```
//!
//! # Architecture
//!
//! All operations go through [`Redkit`], which validates arguments, encodes
//! values and sends one [`Command`] per call through a [`Connection`].
//! [`MemoryStore`] is the in-process store used for embedding and tests;
//! any other transport plugs in by implementing [`ConnectionProvider`].

// Re-export the public API from redkit-executor
pub use redkit_executor::*;

pub use redkit_storage::{ExpiryCleaner, MemoryStore};
