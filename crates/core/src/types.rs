//! Per-command policy types and collection entries.
//!
//! These types parameterize [`Command`](crate::Command) variants. Each one has
//! a documented default so callers never depend on implicit global state.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::Payload;

// =============================================================================
// Routing
// =============================================================================

/// Routing hint attached to a single command.
///
/// The facade picks [`CommandFlags::READ_DEFAULT`] for reads and
/// [`CommandFlags::WRITE_DEFAULT`] for writes. How the hint is enforced is
/// up to the connection; the facade only selects and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandFlags {
    /// No preference
    #[default]
    None,
    /// Prefer the primary, fall back to a replica
    PreferPrimary,
    /// Only the primary may execute the command
    DemandPrimary,
    /// Prefer a replica, fall back to the primary
    PreferReplica,
    /// Only a replica may execute the command
    DemandReplica,
}

impl CommandFlags {
    /// Default for reads: slightly stale data is acceptable.
    pub const READ_DEFAULT: CommandFlags = CommandFlags::PreferReplica;
    /// Default for writes: must not be lost.
    pub const WRITE_DEFAULT: CommandFlags = CommandFlags::DemandPrimary;

    /// True when the flag allows a replica to serve the command.
    pub fn allows_replica(self) -> bool {
        !matches!(self, CommandFlags::DemandPrimary)
    }
}

// =============================================================================
// Write preconditions
// =============================================================================

/// Write-time precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum When {
    /// Write unconditionally
    #[default]
    Always,
    /// Write only if the key (or field) already exists
    Exists,
    /// Write only if the key (or field) does not exist
    NotExists,
}

impl When {
    /// Evaluate the precondition against the current existence of the target.
    pub fn permits(self, exists: bool) -> bool {
        match self {
            When::Always => true,
            When::Exists => exists,
            When::NotExists => !exists,
        }
    }
}

// =============================================================================
// Ordering and ranges
// =============================================================================

/// Result ordering for sorted-set reads and trims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Lowest score first
    #[default]
    Ascending,
    /// Highest score first
    Descending,
}

/// Which bounds of a score range are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclude {
    /// Both bounds inclusive
    #[default]
    None,
    /// Start bound exclusive
    Start,
    /// Stop bound exclusive
    Stop,
    /// Both bounds exclusive
    Both,
}

impl Exclude {
    /// True when `score` falls inside `[start, stop]` under this exclusion.
    pub fn contains(self, start: f64, stop: f64, score: f64) -> bool {
        let above_start = match self {
            Exclude::Start | Exclude::Both => score > start,
            _ => score >= start,
        };
        let below_stop = match self {
            Exclude::Stop | Exclude::Both => score < stop,
            _ => score <= stop,
        };
        above_start && below_stop
    }
}

/// Set algebra used by combine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperation {
    /// Members present in any source
    Union,
    /// Members present in every source
    Intersect,
    /// Members of the first source absent from all others
    Difference,
}

/// How scores are combined when sorted sets are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// Add weighted scores
    #[default]
    Sum,
    /// Keep the smallest weighted score
    Min,
    /// Keep the largest weighted score
    Max,
}

impl Aggregate {
    /// Fold a new weighted score into an accumulated one.
    pub fn combine(self, acc: f64, score: f64) -> f64 {
        match self {
            Aggregate::Sum => acc + score,
            Aggregate::Min => acc.min(score),
            Aggregate::Max => acc.max(score),
        }
    }
}

/// End of a list a push or pop operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListSide {
    /// Head (index 0)
    Left,
    /// Tail (index -1)
    Right,
}

/// Where an inserted list element lands relative to its pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPosition {
    /// Immediately before the pivot
    Before,
    /// Immediately after the pivot
    After,
}

/// Kind of data held under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    /// Key does not exist
    None,
    /// Plain string value
    String,
    /// List
    List,
    /// Set
    Set,
    /// Sorted set
    SortedSet,
    /// Hash
    Hash,
}

impl KeyType {
    /// Lowercase name as the store reports it.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::None => "none",
            KeyType::String => "string",
            KeyType::List => "list",
            KeyType::Set => "set",
            KeyType::SortedSet => "zset",
            KeyType::Hash => "hash",
        }
    }
}

// =============================================================================
// Expiration
// =============================================================================

/// Key expiration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    /// Expire at an absolute instant
    At(DateTime<Utc>),
    /// Expire after a duration measured from when the store applies it
    In(Duration),
}

impl Expiry {
    /// Resolve to an absolute deadline relative to `now`.
    ///
    /// Durations too large to represent saturate at the maximum instant.
    pub fn deadline(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Expiry::At(at) => at,
            Expiry::In(duration) => chrono::Duration::from_std(duration)
                .ok()
                .and_then(|d| now.checked_add_signed(d))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

// =============================================================================
// Collection entries
// =============================================================================

/// A sorted-set member together with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedSetEntry {
    /// Serialized member
    pub element: Payload,
    /// Score that orders the member
    pub score: f64,
}

impl SortedSetEntry {
    /// Create an entry.
    pub fn new(element: impl Into<Payload>, score: f64) -> Self {
        SortedSetEntry {
            element: element.into(),
            score,
        }
    }
}

/// A hash field together with its serialized value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashEntry {
    /// Field name, unique per key
    pub field: String,
    /// Serialized value
    pub value: Payload,
}

impl HashEntry {
    /// Create an entry.
    pub fn new(field: impl Into<String>, value: impl Into<Payload>) -> Self {
        HashEntry {
            field: field.into(),
            value: value.into(),
        }
    }
}
