//! Hash command handlers.

use redkit_core::{HashEntry, Output, Payload, Result, When};

use crate::keyspace::Keyspace;

/// Handle HashSet command.
///
/// With `When::Always` the result reports whether the field is new, so
/// overwriting an existing field yields `false`. The conditional forms
/// report whether anything was written.
pub fn hash_set(
    ks: &mut Keyspace,
    key: String,
    field: String,
    value: Payload,
    when: When,
) -> Result<Output> {
    let exists = ks
        .hash(&key)?
        .map(|h| h.contains_key(&field))
        .unwrap_or(false);
    if !when.permits(exists) {
        return Ok(Output::Bool(false));
    }
    let is_new = ks.hash_entry(&key)?.insert(field, value).is_none();
    Ok(Output::Bool(match when {
        When::Always => is_new,
        When::Exists | When::NotExists => true,
    }))
}

/// Handle HashSetMany command.
pub fn hash_set_many(ks: &mut Keyspace, key: String, entries: Vec<HashEntry>) -> Result<Output> {
    if entries.is_empty() {
        ks.hash(&key)?;
        return Ok(Output::Unit);
    }
    let hash = ks.hash_entry(&key)?;
    for entry in entries {
        hash.insert(entry.field, entry.value);
    }
    Ok(Output::Unit)
}

/// Handle HashDelete command.
pub fn hash_delete(ks: &mut Keyspace, key: String, fields: Vec<String>) -> Result<Output> {
    let removed = match ks.hash_mut(&key)? {
        Some(hash) => fields.iter().filter(|f| hash.remove(f.as_str()).is_some()).count(),
        None => 0,
    };
    ks.remove_if_empty(&key);
    Ok(Output::Int(removed as i64))
}

/// Handle HashExists command.
pub fn hash_exists(ks: &mut Keyspace, key: String, field: String) -> Result<Output> {
    let found = ks.hash(&key)?.map(|h| h.contains_key(&field)).unwrap_or(false);
    Ok(Output::Bool(found))
}

/// Handle HashLength command.
pub fn hash_length(ks: &mut Keyspace, key: String) -> Result<Output> {
    Ok(Output::Int(ks.hash(&key)?.map(|h| h.len()).unwrap_or(0) as i64))
}

/// Handle HashGet command.
pub fn hash_get(ks: &mut Keyspace, key: String, field: String) -> Result<Output> {
    Ok(Output::Value(ks.hash(&key)?.and_then(|h| h.get(&field).cloned())))
}

/// Handle HashGetMany command.
pub fn hash_get_many(ks: &mut Keyspace, key: String, fields: Vec<String>) -> Result<Output> {
    let values = match ks.hash(&key)? {
        Some(hash) => fields.iter().map(|f| hash.get(f).cloned()).collect(),
        None => vec![None; fields.len()],
    };
    Ok(Output::MaybeValues(values))
}

/// Handle HashValues command.
pub fn hash_values(ks: &mut Keyspace, key: String) -> Result<Output> {
    let values: Vec<Payload> = ks
        .hash(&key)?
        .map(|h| h.values().cloned().collect())
        .unwrap_or_default();
    Ok(Output::Values(values))
}

/// Handle HashGetAll command.
pub fn hash_get_all(ks: &mut Keyspace, key: String) -> Result<Output> {
    let entries: Vec<HashEntry> = ks
        .hash(&key)?
        .map(|h| {
            h.iter()
                .map(|(field, value)| HashEntry {
                    field: field.clone(),
                    value: value.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(Output::HashEntries(entries))
}
