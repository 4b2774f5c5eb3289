//! Set operations.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::{unexpected, Redkit};
use crate::guard;
use crate::serialize::Serializer;
use crate::{Command, Expiry, Output, Payload, Result, SetOperation};

fn owned_keys<K: AsRef<str>>(keys: &[K]) -> Vec<String> {
    keys.iter().map(|k| k.as_ref().to_string()).collect()
}

impl<S: Serializer> Redkit<S> {
    fn set_add_payloads(&self, key: &str, members: Vec<Payload>) -> Result<i64> {
        match self.write(Command::SetAdd {
            key: key.to_string(),
            members,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SetAdd")),
        }
    }

    fn set_remove_payloads(&self, key: &str, members: Vec<Payload>) -> Result<i64> {
        match self.write(Command::SetRemove {
            key: key.to_string(),
            members,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SetRemove")),
        }
    }

    /// Add a member. Returns `true` if it was not already present.
    pub fn set_add<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let member = self.encode(value)?;
        info!(target: "redkit::set", key, "Adding set member");
        let added = self.set_add_payloads(key, vec![member])? > 0;
        if !added {
            warn!(target: "redkit::set", key, "Set member already present");
        }
        Ok(added)
    }

    /// Add several members. Returns how many were new. An empty slice
    /// returns 0 without contacting the store.
    pub fn set_add_range<T: Serialize>(&self, key: &str, values: &[T]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        if values.is_empty() {
            warn!(target: "redkit::set", key, "Set add skipped: no values");
            return Ok(0);
        }
        let members = self.encode_all(values)?;
        info!(target: "redkit::set", key, count = members.len(), "Adding set members");
        self.set_add_payloads(key, members)
    }

    /// Remove a member. Returns `true` if it was present.
    pub fn set_remove<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let member = self.encode(value)?;
        info!(target: "redkit::set", key, "Removing set member");
        let removed = self.set_remove_payloads(key, vec![member])? > 0;
        if !removed {
            warn!(target: "redkit::set", key, "Set member not present");
        }
        Ok(removed)
    }

    /// Remove several members. Returns how many were present. An empty
    /// slice returns 0 without contacting the store.
    pub fn set_remove_range<T: Serialize>(&self, key: &str, values: &[T]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        if values.is_empty() {
            warn!(target: "redkit::set", key, "Set remove skipped: no values");
            return Ok(0);
        }
        let members = self.encode_all(values)?;
        info!(target: "redkit::set", key, count = members.len(), "Removing set members");
        let removed = self.set_remove_payloads(key, members)?;
        if removed == 0 {
            warn!(target: "redkit::set", key, "Set remove matched nothing");
        }
        Ok(removed)
    }

    /// Delete the whole set. Returns `true` if it existed.
    pub fn set_remove_all(&self, key: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::set", key, "Removing set");
        let removed = self.delete_keys(vec![key.to_string()])? > 0;
        if !removed {
            warn!(target: "redkit::set", key, "Set not present");
        }
        Ok(removed)
    }

    /// Combine the sets stored under `keys`.
    ///
    /// Fewer than two keys yields an empty result without contacting the
    /// store.
    pub fn set_combine<T, K>(&self, keys: &[K], operation: SetOperation) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Default,
        K: AsRef<str>,
    {
        if keys.len() < 2 {
            warn!(target: "redkit::set", count = keys.len(), ?operation, "Set combine skipped: needs at least two keys");
            return Ok(Vec::new());
        }
        guard::not_empty_all(keys, "keys")?;
        info!(target: "redkit::set", count = keys.len(), ?operation, "Combining sets");
        match self.read(Command::SetCombine {
            operation,
            keys: owned_keys(keys),
        })? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("SetCombine")),
        }
    }

    /// Combine two sets.
    pub fn set_combine_pair<T: DeserializeOwned + Default>(
        &self,
        first: &str,
        second: &str,
        operation: SetOperation,
    ) -> Result<Vec<T>> {
        guard::not_empty(first, "first")?;
        guard::not_empty(second, "second")?;
        self.set_combine(&[first, second], operation)
    }

    /// Combine the sets stored under `keys` into `destination`, replacing
    /// it. Returns the size of the stored set.
    ///
    /// Fewer than two keys returns 0 without contacting the store.
    pub fn set_combine_store<K: AsRef<str>>(
        &self,
        destination: &str,
        keys: &[K],
        operation: SetOperation,
    ) -> Result<i64> {
        guard::not_empty(destination, "destination")?;
        if keys.len() < 2 {
            warn!(target: "redkit::set", destination, count = keys.len(), ?operation, "Set combine-store skipped: needs at least two keys");
            return Ok(0);
        }
        guard::not_empty_all(keys, "keys")?;
        info!(target: "redkit::set", destination, count = keys.len(), ?operation, "Combining sets into destination");
        match self.write(Command::SetCombineStore {
            operation,
            destination: destination.to_string(),
            keys: owned_keys(keys),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SetCombineStore")),
        }
    }

    /// Combine two sets into `destination`.
    pub fn set_combine_store_pair(
        &self,
        destination: &str,
        first: &str,
        second: &str,
        operation: SetOperation,
    ) -> Result<i64> {
        guard::not_empty(first, "first")?;
        guard::not_empty(second, "second")?;
        self.set_combine_store(destination, &[first, second], operation)
    }

    /// Move a member from `source` to `destination` atomically.
    ///
    /// Returns `false` when the member is not in `source`.
    pub fn set_move<T: Serialize + ?Sized>(&self, source: &str, destination: &str, value: &T) -> Result<bool> {
        guard::not_empty(source, "source")?;
        guard::not_empty(destination, "destination")?;
        let member = self.encode(value)?;
        info!(target: "redkit::set", source, destination, "Moving set member");
        let moved = match self.write(Command::SetMove {
            source: source.to_string(),
            destination: destination.to_string(),
            member,
        })? {
            Output::Bool(b) => b,
            _ => return Err(unexpected("SetMove")),
        };
        if !moved {
            warn!(target: "redkit::set", source, destination, "Set move skipped: member not in source");
        }
        Ok(moved)
    }

    /// Membership test.
    pub fn set_exists<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let member = self.encode(value)?;
        match self.read(Command::SetContains {
            key: key.to_string(),
            member,
        })? {
            Output::Bool(b) => Ok(b),
            _ => Err(unexpected("SetContains")),
        }
    }

    /// Number of members.
    pub fn set_count(&self, key: &str) -> Result<i64> {
        guard::not_empty(key, "key")?;
        match self.read(Command::SetLength {
            key: key.to_string(),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SetLength")),
        }
    }

    /// Every member, in no particular order.
    pub fn set_get_all<T: DeserializeOwned + Default>(&self, key: &str) -> Result<Vec<T>> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::set", key, "Getting set members");
        match self.read(Command::SetMembers {
            key: key.to_string(),
        })? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("SetMembers")),
        }
    }

    /// Expire the set at an absolute instant.
    pub fn set_expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool> {
        self.expire("set", key, Expiry::At(at))
    }

    /// Expire the set after `duration`.
    pub fn set_expire_in(&self, key: &str, duration: Duration) -> Result<bool> {
        self.expire("set", key, Expiry::In(duration))
    }
}
