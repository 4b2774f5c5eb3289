//! Set command handlers.

use std::collections::BTreeSet;

use redkit_core::{Output, Payload, Result, SetOperation};

use crate::keyspace::Keyspace;
use crate::stored_value::StoredValue;

/// Handle SetAdd command.
pub fn set_add(ks: &mut Keyspace, key: String, members: Vec<Payload>) -> Result<Output> {
    if members.is_empty() {
        // Still reports WRONGTYPE for a non-set key
        ks.set(&key)?;
        return Ok(Output::Int(0));
    }
    let set = ks.set_entry(&key)?;
    let added = members.into_iter().filter(|m| set.insert(m.clone())).count();
    Ok(Output::Int(added as i64))
}

/// Handle SetRemove command.
pub fn set_remove(ks: &mut Keyspace, key: String, members: Vec<Payload>) -> Result<Output> {
    let removed = match ks.set_mut(&key)? {
        Some(set) => members.iter().filter(|m| set.remove(*m)).count(),
        None => 0,
    };
    ks.remove_if_empty(&key);
    Ok(Output::Int(removed as i64))
}

/// Handle SetMembers command.
pub fn set_members(ks: &mut Keyspace, key: String) -> Result<Output> {
    let members: Vec<Payload> = ks
        .set(&key)?
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default();
    Ok(Output::Values(members))
}

/// Handle SetContains command.
pub fn set_contains(ks: &mut Keyspace, key: String, member: Payload) -> Result<Output> {
    let found = ks.set(&key)?.map(|set| set.contains(&member)).unwrap_or(false);
    Ok(Output::Bool(found))
}

/// Handle SetLength command.
pub fn set_length(ks: &mut Keyspace, key: String) -> Result<Output> {
    let len = ks.set(&key)?.map(|set| set.len()).unwrap_or(0);
    Ok(Output::Int(len as i64))
}

/// Apply `operation` across the sets stored under `keys`. Missing keys are
/// empty sets.
fn combine(ks: &mut Keyspace, operation: SetOperation, keys: &[String]) -> Result<BTreeSet<Payload>> {
    let mut sources = Vec::with_capacity(keys.len());
    for key in keys {
        sources.push(ks.set(key)?.cloned().unwrap_or_default());
    }
    let mut sources = sources.into_iter();
    let first = match sources.next() {
        Some(first) => first,
        None => return Ok(BTreeSet::new()),
    };
    Ok(sources.fold(first, |acc, next| match operation {
        SetOperation::Union => acc.union(&next).cloned().collect(),
        SetOperation::Intersect => acc.intersection(&next).cloned().collect(),
        SetOperation::Difference => acc.difference(&next).cloned().collect(),
    }))
}

/// Handle SetCombine command.
pub fn set_combine(ks: &mut Keyspace, operation: SetOperation, keys: Vec<String>) -> Result<Output> {
    let result = combine(ks, operation, &keys)?;
    Ok(Output::Values(result.into_iter().collect()))
}

/// Handle SetCombineStore command.
///
/// The destination is overwritten regardless of its previous kind. An
/// empty result deletes it.
pub fn set_combine_store(
    ks: &mut Keyspace,
    operation: SetOperation,
    destination: String,
    keys: Vec<String>,
) -> Result<Output> {
    let result = combine(ks, operation, &keys)?;
    let len = result.len();
    if result.is_empty() {
        ks.remove(&destination);
    } else {
        ks.insert(&destination, StoredValue::Set(result), None);
    }
    Ok(Output::Int(len as i64))
}

/// Handle SetMove command.
pub fn set_move(
    ks: &mut Keyspace,
    source: String,
    destination: String,
    member: Payload,
) -> Result<Output> {
    let present = ks.set(&source)?.map(|s| s.contains(&member)).unwrap_or(false);
    // Destination kind is checked before anything moves
    ks.set(&destination)?;
    if !present {
        return Ok(Output::Bool(false));
    }
    if source == destination {
        return Ok(Output::Bool(true));
    }
    if let Some(set) = ks.set_mut(&source)? {
        set.remove(&member);
    }
    ks.remove_if_empty(&source);
    ks.set_entry(&destination)?.insert(member);
    Ok(Output::Bool(true))
}
