//! Typed Facade Integration Tests
//!
//! End-to-end tests through the `redkit` umbrella crate against the
//! in-process store:
//! - item: typed strings, counters and expiry
//! - list / set / sorted_set / hash: one suite per data structure
//! - concurrency: a shared facade across threads
//! - config: `redkit.toml` driven construction

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod config;
mod hash;
mod item;
mod list;
mod set;
mod sorted_set;
