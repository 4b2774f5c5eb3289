//! Key command handlers (any data kind).

use chrono::Utc;
use redkit_core::{Error, Expiry, KeyType, Output, Result, When};

use crate::keyspace::Keyspace;

/// Handle KeyDelete command.
pub fn key_delete(ks: &mut Keyspace, keys: Vec<String>) -> Result<Output> {
    let removed = keys.iter().filter(|key| ks.remove(key).is_some()).count();
    Ok(Output::Int(removed as i64))
}

/// Handle KeyExists command.
pub fn key_exists(ks: &mut Keyspace, key: String) -> Result<Output> {
    Ok(Output::Bool(ks.contains(&key)))
}

/// Handle KeyType command.
pub fn key_type(ks: &mut Keyspace, key: String) -> Result<Output> {
    let kind = ks.get(&key).map(|v| v.key_type()).unwrap_or(KeyType::None);
    Ok(Output::KeyType(kind))
}

/// Handle KeyRename command.
///
/// `when` is evaluated against `new_key`: `NotExists` refuses to overwrite.
pub fn key_rename(ks: &mut Keyspace, key: String, new_key: String, when: When) -> Result<Output> {
    if !ks.contains(&key) {
        return Err(Error::store("ERR no such key"));
    }
    if key != new_key && !when.permits(ks.contains(&new_key)) {
        return Ok(Output::Bool(false));
    }
    Ok(Output::Bool(ks.rename(&key, &new_key)))
}

/// Handle KeyExpire command.
pub fn key_expire(ks: &mut Keyspace, key: String, expiry: Expiry) -> Result<Output> {
    let deadline = expiry.deadline(Utc::now());
    Ok(Output::Bool(ks.set_expiry(&key, deadline)))
}
