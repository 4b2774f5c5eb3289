//! Command enum defining every primitive store operation.
//!
//! Commands are the instruction set the facade speaks to the store. Every
//! typed facade call is expressed as one or more of these variants.
//!
//! Commands are:
//! - **Self-contained**: all parameters needed for execution are in the variant
//! - **Serializable**: they can be converted to/from JSON
//! - **Untyped**: values are already serialized [`Payload`]s

use serde::{Deserialize, Serialize};

use crate::payload::Payload;
use crate::types::*;

/// A primitive store command.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Key | 5 | Delete, exists, type, rename, expire |
/// | String | 5 | Set, get, multi-get, integer/float increment |
/// | List | 7 | Insert, push, pop, remove, length, index, range |
/// | Set | 8 | Add, remove, members, contains, length, combine, combine-store, move |
/// | SortedSet | 10 | Add, increment, remove, range removal, length, score, range reads, combine-store |
/// | Hash | 9 | Set, set-many, delete, exists, length, get, get-many, values, get-all |
///
/// Each variant documents the single [`Output`](crate::Output) variant it
/// produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Key (5) ====================
    /// Delete keys of any type.
    /// Returns: `Output::Int` (number of keys removed)
    KeyDelete { keys: Vec<String> },

    /// Check whether a key exists.
    /// Returns: `Output::Bool`
    KeyExists { key: String },

    /// Report the kind of data under a key.
    /// Returns: `Output::KeyType`
    KeyType { key: String },

    /// Rename a key. Fails with a store error if `key` does not exist.
    /// Returns: `Output::Bool` (false when `when` was not satisfied by `new_key`)
    KeyRename {
        key: String,
        new_key: String,
        when: When,
    },

    /// Attach an expiry to an existing key.
    /// Returns: `Output::Bool` (false if the key does not exist)
    KeyExpire { key: String, expiry: Expiry },

    // ==================== String (5) ====================
    /// Set a string value, optionally with expiry and precondition.
    /// Returns: `Output::Bool` (false when the precondition was not met)
    StringSet {
        key: String,
        value: Payload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expiry: Option<Expiry>,
        #[serde(default)]
        when: When,
    },

    /// Get a string value.
    /// Returns: `Output::Value`
    StringGet { key: String },

    /// Get several string values in one round trip.
    /// Returns: `Output::MaybeValues` (one slot per requested key)
    StringGetMany { keys: Vec<String> },

    /// Add an integer to the value stored at `key` (missing = 0).
    /// Returns: `Output::Int`
    StringIncrement { key: String, delta: i64 },

    /// Add a float to the value stored at `key` (missing = 0).
    /// Returns: `Output::Float`
    StringIncrementFloat { key: String, delta: f64 },

    // ==================== List (7) ====================
    /// Insert `value` before or after the first occurrence of `pivot`.
    /// Returns: `Output::Int` (new length, -1 if pivot missing, 0 if key missing)
    ListInsert {
        key: String,
        position: InsertPosition,
        pivot: Payload,
        value: Payload,
    },

    /// Push values onto one end of a list, in order.
    /// Returns: `Output::Int` (new length)
    ListPush {
        key: String,
        side: ListSide,
        values: Vec<Payload>,
        #[serde(default)]
        when: When,
    },

    /// Pop one value from an end of a list.
    /// Returns: `Output::Value`
    ListPop { key: String, side: ListSide },

    /// Remove occurrences of `value`. `count` 0 removes all, positive counts
    /// from the head, negative from the tail.
    /// Returns: `Output::Int` (number removed)
    ListRemove {
        key: String,
        value: Payload,
        count: i64,
    },

    /// Length of a list.
    /// Returns: `Output::Int`
    ListLength { key: String },

    /// Element at `index` (negative counts from the tail).
    /// Returns: `Output::Value`
    ListIndex { key: String, index: i64 },

    /// Elements between `start` and `stop`, inclusive.
    /// Returns: `Output::Values`
    ListRange { key: String, start: i64, stop: i64 },

    // ==================== Set (8) ====================
    /// Add members to a set.
    /// Returns: `Output::Int` (number newly added)
    SetAdd { key: String, members: Vec<Payload> },

    /// Remove members from a set.
    /// Returns: `Output::Int` (number removed)
    SetRemove { key: String, members: Vec<Payload> },

    /// All members of a set.
    /// Returns: `Output::Values`
    SetMembers { key: String },

    /// Membership test.
    /// Returns: `Output::Bool`
    SetContains { key: String, member: Payload },

    /// Cardinality of a set.
    /// Returns: `Output::Int`
    SetLength { key: String },

    /// Combine sets.
    /// Returns: `Output::Values`
    SetCombine {
        operation: SetOperation,
        keys: Vec<String>,
    },

    /// Combine sets and store the result under `destination`.
    /// Returns: `Output::Int` (cardinality of the stored set)
    SetCombineStore {
        operation: SetOperation,
        destination: String,
        keys: Vec<String>,
    },

    /// Atomically move a member between sets.
    /// Returns: `Output::Bool` (false if the member was not in `source`)
    SetMove {
        source: String,
        destination: String,
        member: Payload,
    },

    // ==================== SortedSet (10) ====================
    /// Add members or update their scores.
    /// Returns: `Output::Int` (number newly added)
    SortedSetAdd {
        key: String,
        entries: Vec<SortedSetEntry>,
    },

    /// Add `delta` to a member's score (missing member starts at 0).
    /// Returns: `Output::Float` (new score)
    SortedSetIncrement {
        key: String,
        member: Payload,
        delta: f64,
    },

    /// Remove members.
    /// Returns: `Output::Int` (number removed)
    SortedSetRemove { key: String, members: Vec<Payload> },

    /// Remove members whose ascending rank lies in `[start, stop]`.
    /// Returns: `Output::Int` (number removed)
    SortedSetRemoveRangeByRank { key: String, start: i64, stop: i64 },

    /// Remove members whose score lies in the range.
    /// Returns: `Output::Int` (number removed)
    SortedSetRemoveRangeByScore {
        key: String,
        start: f64,
        stop: f64,
        #[serde(default)]
        exclude: Exclude,
    },

    /// Number of members whose score lies in the range.
    /// Returns: `Output::Int`
    SortedSetLength {
        key: String,
        min: f64,
        max: f64,
        #[serde(default)]
        exclude: Exclude,
    },

    /// Score of a member.
    /// Returns: `Output::Score`
    SortedSetScore { key: String, member: Payload },

    /// Members whose rank under `order` lies in `[start, stop]`.
    /// Returns: `Output::Entries` when `with_scores`, else `Output::Values`
    SortedSetRangeByRank {
        key: String,
        start: i64,
        stop: i64,
        #[serde(default)]
        order: Order,
        #[serde(default)]
        with_scores: bool,
    },

    /// Members whose score lies in the range, ordered by `order`, after
    /// skipping `skip` and keeping at most `take` (-1 keeps all).
    /// Returns: `Output::Entries` when `with_scores`, else `Output::Values`
    SortedSetRangeByScore {
        key: String,
        start: f64,
        stop: f64,
        #[serde(default)]
        exclude: Exclude,
        #[serde(default)]
        order: Order,
        skip: i64,
        take: i64,
        #[serde(default)]
        with_scores: bool,
    },

    /// Combine sorted sets and store the result under `destination`.
    /// Returns: `Output::Int` (cardinality of the stored set)
    SortedSetCombineStore {
        operation: SetOperation,
        destination: String,
        keys: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<Vec<f64>>,
        #[serde(default)]
        aggregate: Aggregate,
    },

    // ==================== Hash (9) ====================
    /// Set one field.
    /// Returns: `Output::Bool` (true if written)
    HashSet {
        key: String,
        field: String,
        value: Payload,
        #[serde(default)]
        when: When,
    },

    /// Set several fields unconditionally.
    /// Returns: `Output::Unit`
    HashSetMany { key: String, entries: Vec<HashEntry> },

    /// Delete fields.
    /// Returns: `Output::Int` (number removed)
    HashDelete { key: String, fields: Vec<String> },

    /// Field existence test.
    /// Returns: `Output::Bool`
    HashExists { key: String, field: String },

    /// Number of fields.
    /// Returns: `Output::Int`
    HashLength { key: String },

    /// Value of one field.
    /// Returns: `Output::Value`
    HashGet { key: String, field: String },

    /// Values of several fields.
    /// Returns: `Output::MaybeValues` (one slot per requested field)
    HashGetMany { key: String, fields: Vec<String> },

    /// All values.
    /// Returns: `Output::Values`
    HashValues { key: String },

    /// All field/value pairs.
    /// Returns: `Output::HashEntries`
    HashGetAll { key: String },
}

impl Command {
    /// Returns `true` if this command mutates the store.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::KeyDelete { .. }
                | Command::KeyRename { .. }
                | Command::KeyExpire { .. }
                | Command::StringSet { .. }
                | Command::StringIncrement { .. }
                | Command::StringIncrementFloat { .. }
                | Command::ListInsert { .. }
                | Command::ListPush { .. }
                | Command::ListPop { .. }
                | Command::ListRemove { .. }
                | Command::SetAdd { .. }
                | Command::SetRemove { .. }
                | Command::SetCombineStore { .. }
                | Command::SetMove { .. }
                | Command::SortedSetAdd { .. }
                | Command::SortedSetIncrement { .. }
                | Command::SortedSetRemove { .. }
                | Command::SortedSetRemoveRangeByRank { .. }
                | Command::SortedSetRemoveRangeByScore { .. }
                | Command::SortedSetCombineStore { .. }
                | Command::HashSet { .. }
                | Command::HashSetMany { .. }
                | Command::HashDelete { .. }
        )
    }

    /// Returns the variant name as a static string.
    ///
    /// The exhaustive match makes the compiler flag any new variant that is
    /// added without a name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::KeyDelete { .. } => "KeyDelete",
            Command::KeyExists { .. } => "KeyExists",
            Command::KeyType { .. } => "KeyType",
            Command::KeyRename { .. } => "KeyRename",
            Command::KeyExpire { .. } => "KeyExpire",
            Command::StringSet { .. } => "StringSet",
            Command::StringGet { .. } => "StringGet",
            Command::StringGetMany { .. } => "StringGetMany",
            Command::StringIncrement { .. } => "StringIncrement",
            Command::StringIncrementFloat { .. } => "StringIncrementFloat",
            Command::ListInsert { .. } => "ListInsert",
            Command::ListPush { .. } => "ListPush",
            Command::ListPop { .. } => "ListPop",
            Command::ListRemove { .. } => "ListRemove",
            Command::ListLength { .. } => "ListLength",
            Command::ListIndex { .. } => "ListIndex",
            Command::ListRange { .. } => "ListRange",
            Command::SetAdd { .. } => "SetAdd",
            Command::SetRemove { .. } => "SetRemove",
            Command::SetMembers { .. } => "SetMembers",
            Command::SetContains { .. } => "SetContains",
            Command::SetLength { .. } => "SetLength",
            Command::SetCombine { .. } => "SetCombine",
            Command::SetCombineStore { .. } => "SetCombineStore",
            Command::SetMove { .. } => "SetMove",
            Command::SortedSetAdd { .. } => "SortedSetAdd",
            Command::SortedSetIncrement { .. } => "SortedSetIncrement",
            Command::SortedSetRemove { .. } => "SortedSetRemove",
            Command::SortedSetRemoveRangeByRank { .. } => "SortedSetRemoveRangeByRank",
            Command::SortedSetRemoveRangeByScore { .. } => "SortedSetRemoveRangeByScore",
            Command::SortedSetLength { .. } => "SortedSetLength",
            Command::SortedSetScore { .. } => "SortedSetScore",
            Command::SortedSetRangeByRank { .. } => "SortedSetRangeByRank",
            Command::SortedSetRangeByScore { .. } => "SortedSetRangeByScore",
            Command::SortedSetCombineStore { .. } => "SortedSetCombineStore",
            Command::HashSet { .. } => "HashSet",
            Command::HashSetMany { .. } => "HashSetMany",
            Command::HashDelete { .. } => "HashDelete",
            Command::HashExists { .. } => "HashExists",
            Command::HashLength { .. } => "HashLength",
            Command::HashGet { .. } => "HashGet",
            Command::HashGetMany { .. } => "HashGetMany",
            Command::HashValues { .. } => "HashValues",
            Command::HashGetAll { .. } => "HashGetAll",
        }
    }
}
