//! Core vocabulary for Redkit
//!
//! This crate defines the types shared by the typed facade and by any store
//! that executes its commands:
//! - Payload: the serialized form of a typed value
//! - Command / Output: the primitive store instruction set and its results
//! - CommandFlags, When, Order, Exclude, SetOperation, Aggregate: per-command policies
//! - Expiry: absolute or relative key expiration
//! - Error: the error hierarchy shared by facade and store
//! - Connection / ConnectionProvider: the seam to the store transport

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod error;
pub mod output;
pub mod payload;
pub mod traits;
pub mod types;

pub use command::Command;
pub use error::{Error, Result};
pub use output::Output;
pub use payload::Payload;
pub use traits::{Connection, ConnectionProvider};
pub use types::{
    Aggregate, CommandFlags, Exclude, Expiry, HashEntry, InsertPosition, KeyType, ListSide, Order,
    SetOperation, SortedSetEntry, When,
};
