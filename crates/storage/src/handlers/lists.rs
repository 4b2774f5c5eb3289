//! List command handlers.

use redkit_core::{InsertPosition, ListSide, Output, Payload, Result, When};

use super::{normalize_index, normalize_range};
use crate::keyspace::Keyspace;

/// Handle ListInsert command.
pub fn list_insert(
    ks: &mut Keyspace,
    key: String,
    position: InsertPosition,
    pivot: Payload,
    value: Payload,
) -> Result<Output> {
    let list = match ks.list_mut(&key)? {
        Some(list) => list,
        None => return Ok(Output::Int(0)),
    };
    let at = match list.iter().position(|v| *v == pivot) {
        Some(at) => at,
        None => return Ok(Output::Int(-1)),
    };
    let at = match position {
        InsertPosition::Before => at,
        InsertPosition::After => at + 1,
    };
    list.insert(at, value);
    Ok(Output::Int(list.len() as i64))
}

/// Handle ListPush command.
///
/// Values are pushed one at a time, so a left push of `[a, b]` leaves `b`
/// at the head. `When::Exists` only pushes onto an existing list and
/// `When::NotExists` only creates a new one; a refused push returns 0.
pub fn list_push(
    ks: &mut Keyspace,
    key: String,
    side: ListSide,
    values: Vec<Payload>,
    when: When,
) -> Result<Output> {
    let exists = ks.list(&key)?.is_some();
    if !when.permits(exists) {
        return Ok(Output::Int(0));
    }
    if values.is_empty() {
        let len = ks.list(&key)?.map(|l| l.len()).unwrap_or(0);
        return Ok(Output::Int(len as i64));
    }
    let list = ks.list_entry(&key)?;
    for value in values {
        match side {
            ListSide::Left => list.push_front(value),
            ListSide::Right => list.push_back(value),
        }
    }
    Ok(Output::Int(list.len() as i64))
}

/// Handle ListPop command.
pub fn list_pop(ks: &mut Keyspace, key: String, side: ListSide) -> Result<Output> {
    let popped = match ks.list_mut(&key)? {
        Some(list) => match side {
            ListSide::Left => list.pop_front(),
            ListSide::Right => list.pop_back(),
        },
        None => None,
    };
    ks.remove_if_empty(&key);
    Ok(Output::Value(popped))
}

/// Handle ListRemove command.
pub fn list_remove(ks: &mut Keyspace, key: String, value: Payload, count: i64) -> Result<Output> {
    let list = match ks.list_mut(&key)? {
        Some(list) => list,
        None => return Ok(Output::Int(0)),
    };
    let limit = if count == 0 {
        usize::MAX
    } else {
        count.unsigned_abs() as usize
    };
    let mut removed = 0usize;
    if count >= 0 {
        let mut i = 0;
        while i < list.len() && removed < limit {
            if list[i] == value {
                list.remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
    } else {
        let mut i = list.len();
        while i > 0 && removed < limit {
            i -= 1;
            if list[i] == value {
                list.remove(i);
                removed += 1;
            }
        }
    }
    ks.remove_if_empty(&key);
    Ok(Output::Int(removed as i64))
}

/// Handle ListLength command.
pub fn list_length(ks: &mut Keyspace, key: String) -> Result<Output> {
    let len = ks.list(&key)?.map(|l| l.len()).unwrap_or(0);
    Ok(Output::Int(len as i64))
}

/// Handle ListIndex command.
pub fn list_index(ks: &mut Keyspace, key: String, index: i64) -> Result<Output> {
    let value = ks
        .list(&key)?
        .and_then(|list| normalize_index(index, list.len()).map(|i| list[i].clone()));
    Ok(Output::Value(value))
}

/// Handle ListRange command.
pub fn list_range(ks: &mut Keyspace, key: String, start: i64, stop: i64) -> Result<Output> {
    let values = match ks.list(&key)? {
        Some(list) => match normalize_range(start, stop, list.len()) {
            Some((from, to)) => list.range(from..=to).cloned().collect(),
            None => Vec::new(),
        },
        None => Vec::new(),
    };
    Ok(Output::Values(values))
}
