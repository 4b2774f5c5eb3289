//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant. The mapping is
//! deterministic: the same command always produces the same variant, though
//! the values depend on store state.

use serde::{Deserialize, Serialize};

use crate::payload::Payload;
use crate::types::{HashEntry, KeyType, SortedSetEntry};

/// Successful command results.
///
/// # Example
///
/// ```text
/// match connection.execute(Command::StringGet { key }, flags)? {
///     Output::Value(Some(p)) => println!("Found: {:?}", p),
///     Output::Value(None) => println!("Not found"),
///     _ => unreachable!("StringGet always returns Value"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    // ==================== Scalars ====================
    /// No return value
    Unit,

    /// Boolean result
    Bool(bool),

    /// Integer result (counts, lengths, incremented values)
    Int(i64),

    /// Float result (incremented values, scores)
    Float(f64),

    /// Optional score (missing member)
    Score(Option<f64>),

    /// Kind of data under a key
    KeyType(KeyType),

    // ==================== Payloads ====================
    /// Optional payload (missing key, empty list, out-of-range index)
    Value(Option<Payload>),

    /// One optional payload per requested key or field
    MaybeValues(Vec<Option<Payload>>),

    /// Payloads in store order
    Values(Vec<Payload>),

    // ==================== Entries ====================
    /// Sorted-set members with scores
    Entries(Vec<SortedSetEntry>),

    /// Hash field/value pairs
    HashEntries(Vec<HashEntry>),
}

impl Output {
    /// Variant name, used in diagnostics for unexpected outputs.
    pub fn name(&self) -> &'static str {
        match self {
            Output::Unit => "Unit",
            Output::Bool(_) => "Bool",
            Output::Int(_) => "Int",
            Output::Float(_) => "Float",
            Output::Score(_) => "Score",
            Output::KeyType(_) => "KeyType",
            Output::Value(_) => "Value",
            Output::MaybeValues(_) => "MaybeValues",
            Output::Values(_) => "Values",
            Output::Entries(_) => "Entries",
            Output::HashEntries(_) => "HashEntries",
        }
    }
}
