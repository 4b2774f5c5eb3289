//! Keyspace with lazy and active expiration
//!
//! The keyspace maps keys to [`StoredValue`]s with an optional deadline.
//! An entry past its deadline is removed the next time it is touched, so
//! expired keys are indistinguishable from missing ones. The [`TTLIndex`]
//! lets [`Keyspace::purge_expired`] drop them without waiting for access.
//!
//! Typed accessors enforce that a key holds the expected kind of data and
//! report `WrongType` otherwise.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use redkit_core::{Error, KeyType, Payload, Result};
use rustc_hash::FxHashMap;

use crate::stored_value::{SortedSet, StoredValue};
use crate::ttl::TTLIndex;

#[derive(Debug, Clone)]
struct Entry {
    value: StoredValue,
    expires_at: Option<DateTime<Utc>>,
}

/// Build the store's WRONGTYPE error
pub fn wrong_type(key: &str, expected: KeyType, actual: KeyType) -> Error {
    Error::WrongType {
        key: key.to_string(),
        expected: expected.as_str().to_string(),
        actual: actual.as_str().to_string(),
    }
}

/// All data of one store
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: FxHashMap<String, Entry>,
    ttl: TTLIndex,
}

/// Generates read, write, and create-on-write accessors for one data kind.
macro_rules! typed_accessors {
    ($read:ident, $write:ident, $create:ident, $variant:ident, $ty:ty, $kind:expr, $new:expr) => {
        /// Read access; `None` when the key is missing
        pub fn $read(&mut self, key: &str) -> Result<Option<&$ty>> {
            match self.get(key) {
                None => Ok(None),
                Some(StoredValue::$variant(v)) => Ok(Some(v)),
                Some(other) => Err(wrong_type(key, $kind, other.key_type())),
            }
        }

        /// Write access; `None` when the key is missing
        pub fn $write(&mut self, key: &str) -> Result<Option<&mut $ty>> {
            match self.get_mut(key) {
                None => Ok(None),
                Some(StoredValue::$variant(v)) => Ok(Some(v)),
                Some(other) => Err(wrong_type(key, $kind, other.key_type())),
            }
        }

        /// Write access, creating an empty value when the key is missing
        ///
        /// Callers must run [`Keyspace::remove_if_empty`] afterwards if the
        /// operation may leave the collection empty.
        pub fn $create(&mut self, key: &str) -> Result<&mut $ty> {
            self.expire_if_due(key);
            let entry = self.entries.entry(key.to_string()).or_insert_with(|| Entry {
                value: StoredValue::$variant($new),
                expires_at: None,
            });
            match &mut entry.value {
                StoredValue::$variant(v) => Ok(v),
                other => Err(wrong_type(key, $kind, other.key_type())),
            }
        }
    };
}

impl Keyspace {
    /// Create an empty keyspace
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Remove `key` if its deadline has passed. Returns true if it was removed.
    fn expire_if_due(&mut self, key: &str) -> bool {
        let due = match self.entries.get(key) {
            Some(Entry {
                expires_at: Some(deadline),
                ..
            }) => *deadline <= Self::now(),
            _ => false,
        };
        if due {
            self.remove(key);
        }
        due
    }

    /// Live value under `key`
    pub fn get(&mut self, key: &str) -> Option<&StoredValue> {
        self.expire_if_due(key);
        self.entries.get(key).map(|e| &e.value)
    }

    /// Mutable live value under `key`. The deadline is preserved.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut StoredValue> {
        self.expire_if_due(key);
        self.entries.get_mut(key).map(|e| &mut e.value)
    }

    /// True when `key` holds a live value
    pub fn contains(&mut self, key: &str) -> bool {
        self.expire_if_due(key);
        self.entries.contains_key(key)
    }

    /// Store a value, replacing any previous value and deadline.
    ///
    /// A deadline that has already passed leaves the key absent.
    pub fn insert(&mut self, key: &str, value: StoredValue, deadline: Option<DateTime<Utc>>) {
        self.remove(key);
        if let Some(deadline) = deadline {
            if deadline <= Self::now() {
                return;
            }
            self.ttl.insert(deadline, key);
        }
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: deadline,
            },
        );
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<StoredValue> {
        let entry = self.entries.remove(key)?;
        if let Some(deadline) = entry.expires_at {
            self.ttl.remove(deadline, key);
        }
        Some(entry.value)
    }

    /// Drop `key` if it holds an empty collection
    pub fn remove_if_empty(&mut self, key: &str) {
        let empty = self
            .entries
            .get(key)
            .map(|e| e.value.is_empty_collection())
            .unwrap_or(false);
        if empty {
            self.remove(key);
        }
    }

    /// Attach a deadline to an existing key. Returns false if the key is missing.
    ///
    /// A deadline that has already passed removes the key.
    pub fn set_expiry(&mut self, key: &str, deadline: DateTime<Utc>) -> bool {
        if !self.contains(key) {
            return false;
        }
        if deadline <= Self::now() {
            self.remove(key);
            return true;
        }
        if let Some(entry) = self.entries.get_mut(key) {
            if let Some(old) = entry.expires_at.replace(deadline) {
                self.ttl.remove(old, key);
            }
            self.ttl.insert(deadline, key);
        }
        true
    }

    /// Deadline of a live key
    pub fn expiry(&mut self, key: &str) -> Option<DateTime<Utc>> {
        self.expire_if_due(key);
        self.entries.get(key).and_then(|e| e.expires_at)
    }

    /// Move the value and deadline of `key` to `new_key`, overwriting it.
    /// Returns false if `key` is missing.
    pub fn rename(&mut self, key: &str, new_key: &str) -> bool {
        if !self.contains(key) {
            return false;
        }
        if key == new_key {
            return true;
        }
        let deadline = self.expiry(key);
        match self.remove(key) {
            Some(value) => {
                self.insert(new_key, value, deadline);
                true
            }
            None => false,
        }
    }

    /// Remove every key whose deadline has passed. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Self::now();
        let expired = self.ttl.find_expired(now);
        self.ttl.remove_expired(now);
        expired
            .iter()
            .filter(|key| self.entries.remove(key.as_str()).is_some())
            .count()
    }

    /// Number of keys, including expired keys not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.entries.clear();
        self.ttl = TTLIndex::new();
    }

    typed_accessors!(
        string,
        string_mut,
        string_entry,
        String,
        Payload,
        KeyType::String,
        Payload::empty()
    );
    typed_accessors!(
        list,
        list_mut,
        list_entry,
        List,
        VecDeque<Payload>,
        KeyType::List,
        VecDeque::new()
    );
    typed_accessors!(
        set,
        set_mut,
        set_entry,
        Set,
        BTreeSet<Payload>,
        KeyType::Set,
        BTreeSet::new()
    );
    typed_accessors!(
        sorted_set,
        sorted_set_mut,
        sorted_set_entry,
        SortedSet,
        SortedSet,
        KeyType::SortedSet,
        SortedSet::new()
    );
    typed_accessors!(
        hash,
        hash_mut,
        hash_entry,
        Hash,
        BTreeMap<String, Payload>,
        KeyType::Hash,
        BTreeMap::new()
    );
}
