//! TTL index for active expiration
//!
//! Maps expiry deadline → set of keys so that expired keys can be found
//! without scanning the whole keyspace:
//! - BTreeMap keeps deadlines sorted
//! - `find_expired()` is O(expired count), not O(total keys)
//!
//! Lazy expiration on access does not need this index; it backs
//! [`MemoryStore::purge_expired`](crate::MemoryStore::purge_expired).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

/// TTL index: deadline → keys
#[derive(Debug, Default)]
pub struct TTLIndex {
    index: BTreeMap<DateTime<Utc>, BTreeSet<String>>,
}

impl TTLIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
        }
    }

    /// Track `key` as expiring at `deadline`
    pub fn insert(&mut self, deadline: DateTime<Utc>, key: &str) {
        self.index
            .entry(deadline)
            .or_default()
            .insert(key.to_string());
    }

    /// Stop tracking `key` at `deadline`
    ///
    /// Used when a key is deleted, overwritten, renamed, or given a new
    /// deadline. Empty deadline buckets are dropped.
    pub fn remove(&mut self, deadline: DateTime<Utc>, key: &str) {
        if let Some(keys) = self.index.get_mut(&deadline) {
            keys.remove(key);
            if keys.is_empty() {
                self.index.remove(&deadline);
            }
        }
    }

    /// Keys whose deadline is at or before `now`
    pub fn find_expired(&self, now: DateTime<Utc>) -> Vec<String> {
        self.index
            .range(..=now)
            .flat_map(|(_, keys)| keys.iter().cloned())
            .collect()
    }

    /// Drop every bucket at or before `now`, returning how many keys they held
    pub fn remove_expired(&mut self, now: DateTime<Utc>) -> usize {
        let expired: Vec<DateTime<Utc>> = self.index.range(..=now).map(|(d, _)| *d).collect();
        let mut count = 0;
        for deadline in expired {
            if let Some(keys) = self.index.remove(&deadline) {
                count += keys.len();
            }
        }
        count
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.index.values().map(|keys| keys.len()).sum()
    }

    /// True when no key is tracked
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
