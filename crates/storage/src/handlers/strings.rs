//! String command handlers.

use chrono::Utc;
use redkit_core::{Error, Expiry, Output, Payload, Result, When};

use crate::keyspace::Keyspace;
use crate::stored_value::StoredValue;

/// Handle StringSet command.
///
/// Overwrites a value of any kind. Without an expiry the previous deadline
/// is cleared.
pub fn string_set(
    ks: &mut Keyspace,
    key: String,
    value: Payload,
    expiry: Option<Expiry>,
    when: When,
) -> Result<Output> {
    if !when.permits(ks.contains(&key)) {
        return Ok(Output::Bool(false));
    }
    let deadline = expiry.map(|e| e.deadline(Utc::now()));
    ks.insert(&key, StoredValue::String(value), deadline);
    Ok(Output::Bool(true))
}

/// Handle StringGet command.
pub fn string_get(ks: &mut Keyspace, key: String) -> Result<Output> {
    Ok(Output::Value(ks.string(&key)?.cloned()))
}

/// Handle StringGetMany command.
///
/// Keys holding other kinds of data read as missing.
pub fn string_get_many(ks: &mut Keyspace, keys: Vec<String>) -> Result<Output> {
    let values = keys
        .iter()
        .map(|key| match ks.get(key) {
            Some(StoredValue::String(p)) => Some(p.clone()),
            _ => None,
        })
        .collect();
    Ok(Output::MaybeValues(values))
}

fn parse_current<T: std::str::FromStr>(ks: &mut Keyspace, key: &str, what: &str) -> Result<Option<T>> {
    match ks.string(key)? {
        None => Ok(None),
        Some(p) => std::str::from_utf8(p.as_bytes())
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .map(Some)
            .ok_or_else(|| Error::store(format!("ERR value is not {}", what))),
    }
}

fn write_preserving_deadline(ks: &mut Keyspace, key: &str, value: Payload) -> Result<()> {
    match ks.string_mut(key)? {
        Some(current) => *current = value,
        None => ks.insert(key, StoredValue::String(value), None),
    }
    Ok(())
}

/// Handle StringIncrement command.
pub fn string_increment(ks: &mut Keyspace, key: String, delta: i64) -> Result<Output> {
    let current: i64 = parse_current(ks, &key, "an integer or out of range")?.unwrap_or(0);
    let next = current
        .checked_add(delta)
        .ok_or_else(|| Error::store("ERR increment or decrement would overflow"))?;
    write_preserving_deadline(ks, &key, Payload::from(next.to_string()))?;
    Ok(Output::Int(next))
}

/// Handle StringIncrementFloat command.
pub fn string_increment_float(ks: &mut Keyspace, key: String, delta: f64) -> Result<Output> {
    let current: f64 = parse_current(ks, &key, "a valid float")?.unwrap_or(0.0);
    let next = current + delta;
    if !next.is_finite() {
        return Err(Error::store("ERR increment would produce NaN or Infinity"));
    }
    write_preserving_deadline(ks, &key, Payload::from(next.to_string()))?;
    Ok(Output::Float(next))
}
