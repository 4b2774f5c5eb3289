//! Sorted set operations.
//!
//! Members are ordered by score, ties by serialized bytes. Ranks are
//! 0-based; negative ranks count from the end.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::{page_window, unexpected, Redkit, ScoreRange};
use crate::guard;
use crate::serialize::{from_payload, Serializer};
use crate::{
    Aggregate, Command, Exclude, Expiry, Order, Output, Payload, Result, SetOperation,
    SortedSetEntry,
};

impl<S: Serializer> Redkit<S> {
    fn sorted_set_add_entries(&self, key: &str, entries: Vec<SortedSetEntry>) -> Result<i64> {
        match self.write(Command::SortedSetAdd {
            key: key.to_string(),
            entries,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SortedSetAdd")),
        }
    }

    fn sorted_set_remove_members(&self, key: &str, members: Vec<Payload>) -> Result<i64> {
        match self.write(Command::SortedSetRemove {
            key: key.to_string(),
            members,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SortedSetRemove")),
        }
    }

    fn decode_entries<T: DeserializeOwned + Default>(&self, entries: Vec<SortedSetEntry>) -> Result<Vec<(T, f64)>> {
        entries
            .into_iter()
            .filter(|e| !e.element.is_empty())
            .map(|e| Ok((from_payload(self.serializer(), &e.element)?, e.score)))
            .collect()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Add a member or update its score. Returns `true` if it is new.
    pub fn sorted_set_add<T: Serialize + ?Sized>(&self, key: &str, value: &T, score: f64) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let element = self.encode(value)?;
        info!(target: "redkit::sorted_set", key, score, "Adding sorted set member");
        let added = self.sorted_set_add_entries(key, vec![SortedSetEntry { element, score }])? > 0;
        if !added {
            warn!(target: "redkit::sorted_set", key, score, "Sorted set member already present, score updated");
        }
        Ok(added)
    }

    /// Add or rescore several members. Returns how many were new. An empty
    /// slice returns 0 without contacting the store.
    pub fn sorted_set_add_range<T: Serialize>(&self, key: &str, values: &[(T, f64)]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        if values.is_empty() {
            warn!(target: "redkit::sorted_set", key, "Sorted set add skipped: no values");
            return Ok(0);
        }
        let entries = values
            .iter()
            .map(|(value, score)| {
                Ok(SortedSetEntry {
                    element: self.encode(value)?,
                    score: *score,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!(target: "redkit::sorted_set", key, count = entries.len(), "Adding sorted set members");
        self.sorted_set_add_entries(key, entries)
    }

    /// Add `delta` to a member's score, creating it at 0 if absent.
    /// Returns the new score.
    pub fn sorted_set_increment_score<T: Serialize + ?Sized>(&self, key: &str, value: &T, delta: f64) -> Result<f64> {
        guard::not_empty(key, "key")?;
        let member = self.encode(value)?;
        info!(target: "redkit::sorted_set", key, delta, "Incrementing sorted set score");
        match self.write(Command::SortedSetIncrement {
            key: key.to_string(),
            member,
            delta,
        })? {
            Output::Float(score) => Ok(score),
            _ => Err(unexpected("SortedSetIncrement")),
        }
    }

    /// Subtract `delta` from a member's score. Returns the new score.
    pub fn sorted_set_decrement_score<T: Serialize + ?Sized>(&self, key: &str, value: &T, delta: f64) -> Result<f64> {
        self.sorted_set_increment_score(key, value, -delta)
    }

    /// Remove a member. Returns `true` if it was present.
    pub fn sorted_set_remove<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let member = self.encode(value)?;
        info!(target: "redkit::sorted_set", key, "Removing sorted set member");
        let removed = self.sorted_set_remove_members(key, vec![member])? > 0;
        if !removed {
            warn!(target: "redkit::sorted_set", key, "Sorted set member not present");
        }
        Ok(removed)
    }

    /// Remove several members. Returns how many were present. An empty
    /// slice returns 0 without contacting the store.
    pub fn sorted_set_remove_range<T: Serialize>(&self, key: &str, values: &[T]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        if values.is_empty() {
            warn!(target: "redkit::sorted_set", key, "Sorted set remove skipped: no values");
            return Ok(0);
        }
        let members = self.encode_all(values)?;
        info!(target: "redkit::sorted_set", key, count = members.len(), "Removing sorted set members");
        let removed = self.sorted_set_remove_members(key, members)?;
        if removed == 0 {
            warn!(target: "redkit::sorted_set", key, "Sorted set remove matched nothing");
        }
        Ok(removed)
    }

    /// Remove members whose ascending rank lies in `[start, stop]`.
    pub fn sorted_set_remove_by_rank(&self, key: &str, start: i64, stop: i64) -> Result<i64> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::sorted_set", key, start, stop, "Removing sorted set rank range");
        match self.write(Command::SortedSetRemoveRangeByRank {
            key: key.to_string(),
            start,
            stop,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SortedSetRemoveRangeByRank")),
        }
    }

    /// Remove members whose score lies between `start` and `stop`.
    pub fn sorted_set_remove_by_score(&self, key: &str, start: f64, stop: f64, exclude: Exclude) -> Result<i64> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::sorted_set", key, start, stop, ?exclude, "Removing sorted set score range");
        match self.write(Command::SortedSetRemoveRangeByScore {
            key: key.to_string(),
            start,
            stop,
            exclude,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SortedSetRemoveRangeByScore")),
        }
    }

    /// Delete the whole sorted set. Returns `true` if it existed.
    pub fn sorted_set_remove_all(&self, key: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::sorted_set", key, "Removing sorted set");
        let removed = self.delete_keys(vec![key.to_string()])? > 0;
        if !removed {
            warn!(target: "redkit::sorted_set", key, "Sorted set not present");
        }
        Ok(removed)
    }

    /// Keep only `size` members. Returns how many were removed.
    ///
    /// `Order::Descending` keeps the highest scores, `Order::Ascending` the
    /// lowest.
    pub fn sorted_set_trim(&self, key: &str, size: i64, order: Order) -> Result<i64> {
        guard::not_empty(key, "key")?;
        guard::min_value(size, 0, "size")?;
        let (start, stop) = match order {
            Order::Descending => (0, -size - 1),
            Order::Ascending => (size, -1),
        };
        info!(target: "redkit::sorted_set", key, size, ?order, "Trimming sorted set");
        self.sorted_set_remove_by_rank(key, start, stop)
    }

    /// Keep the `size` highest-scoring members.
    pub fn sorted_set_trim_top(&self, key: &str, size: i64) -> Result<i64> {
        self.sorted_set_trim(key, size, Order::Descending)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Number of members.
    pub fn sorted_set_count(&self, key: &str) -> Result<i64> {
        guard::not_empty(key, "key")?;
        match self.read(Command::SortedSetLength {
            key: key.to_string(),
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            exclude: Exclude::None,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SortedSetLength")),
        }
    }

    /// True when `value` is a member.
    pub fn sorted_set_exists<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let member = self.encode(value)?;
        match self.read(Command::SortedSetScore {
            key: key.to_string(),
            member,
        })? {
            Output::Score(score) => Ok(score.is_some()),
            _ => Err(unexpected("SortedSetScore")),
        }
    }

    fn sorted_set_rank_range(&self, key: &str, start: i64, stop: i64, order: Order, with_scores: bool) -> Result<Output> {
        self.read(Command::SortedSetRangeByRank {
            key: key.to_string(),
            start,
            stop,
            order,
            with_scores,
        })
    }

    fn sorted_set_first<T: DeserializeOwned + Default>(&self, key: &str, order: Order) -> Result<T> {
        guard::not_empty(key, "key")?;
        match self.sorted_set_rank_range(key, 0, 1, order, false)? {
            Output::Values(payloads) => {
                if payloads.is_empty() {
                    warn!(target: "redkit::sorted_set", key, "Sorted set is empty");
                }
                self.decode(payloads.into_iter().next())
            }
            _ => Err(unexpected("SortedSetRangeByRank")),
        }
    }

    /// Lowest-scoring member; `T::default()` when empty.
    pub fn sorted_set_get_min_by_score<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        info!(target: "redkit::sorted_set", key, "Getting lowest-scoring member");
        self.sorted_set_first(key, Order::Ascending)
    }

    /// Highest-scoring member; `T::default()` when empty.
    pub fn sorted_set_get_max_by_score<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        info!(target: "redkit::sorted_set", key, "Getting highest-scoring member");
        self.sorted_set_first(key, Order::Descending)
    }

    /// One page of members by rank. Pages start at 1.
    pub fn sorted_set_get_page<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        page: i64,
        page_size: i64,
        order: Order,
    ) -> Result<Vec<T>> {
        guard::not_empty(key, "key")?;
        guard::min_value(page, 1, "page")?;
        guard::min_value(page_size, 1, "page_size")?;
        let (start, stop) = page_window(page, page_size)?;
        info!(target: "redkit::sorted_set", key, page, page_size, ?order, "Getting sorted set page");
        match self.sorted_set_rank_range(key, start, stop, order, false)? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("SortedSetRangeByRank")),
        }
    }

    /// One page of members by rank, with their scores.
    pub fn sorted_set_get_page_with_scores<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        page: i64,
        page_size: i64,
        order: Order,
    ) -> Result<Vec<(T, f64)>> {
        guard::not_empty(key, "key")?;
        guard::min_value(page, 1, "page")?;
        guard::min_value(page_size, 1, "page_size")?;
        let (start, stop) = page_window(page, page_size)?;
        info!(target: "redkit::sorted_set", key, page, page_size, ?order, "Getting sorted set page with scores");
        match self.sorted_set_rank_range(key, start, stop, order, true)? {
            Output::Entries(entries) => self.decode_entries(entries),
            _ => Err(unexpected("SortedSetRangeByRank")),
        }
    }

    fn sorted_set_score_page(
        &self,
        key: &str,
        range: ScoreRange,
        page: i64,
        page_size: i64,
        order: Order,
        with_scores: bool,
    ) -> Result<Output> {
        guard::not_empty(key, "key")?;
        guard::min_value(page, 1, "page")?;
        guard::min_value(page_size, 1, "page_size")?;
        let (skip, _) = page_window(page, page_size)?;
        info!(
            target: "redkit::sorted_set",
            key,
            start = range.start,
            stop = range.stop,
            exclude = ?range.exclude,
            page,
            page_size,
            ?order,
            "Getting sorted set page by score"
        );
        self.read(Command::SortedSetRangeByScore {
            key: key.to_string(),
            start: range.start,
            stop: range.stop,
            exclude: range.exclude,
            order,
            skip,
            take: page_size,
            with_scores,
        })
    }

    /// One page of the members whose score lies in `range`.
    pub fn sorted_set_get_page_by_score<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        range: ScoreRange,
        page: i64,
        page_size: i64,
        order: Order,
    ) -> Result<Vec<T>> {
        match self.sorted_set_score_page(key, range, page, page_size, order, false)? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("SortedSetRangeByScore")),
        }
    }

    /// One page of the members whose score lies in `range`, with scores.
    pub fn sorted_set_get_page_by_score_with_scores<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        range: ScoreRange,
        page: i64,
        page_size: i64,
        order: Order,
    ) -> Result<Vec<(T, f64)>> {
        match self.sorted_set_score_page(key, range, page, page_size, order, true)? {
            Output::Entries(entries) => self.decode_entries(entries),
            _ => Err(unexpected("SortedSetRangeByScore")),
        }
    }

    /// Every member in the requested order.
    pub fn sorted_set_get_all<T: DeserializeOwned + Default>(&self, key: &str, order: Order) -> Result<Vec<T>> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::sorted_set", key, ?order, "Getting sorted set members");
        match self.sorted_set_rank_range(key, 0, -1, order, false)? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("SortedSetRangeByRank")),
        }
    }

    // =========================================================================
    // Combine and expiry
    // =========================================================================

    /// Combine the sorted sets under `keys` into `destination`, summing
    /// scores. Returns the size of the stored set.
    pub fn sorted_set_combine_store<K: AsRef<str>>(
        &self,
        destination: &str,
        keys: &[K],
        operation: SetOperation,
    ) -> Result<i64> {
        guard::not_empty(destination, "destination")?;
        guard::not_empty_all(keys, "keys")?;
        info!(target: "redkit::sorted_set", destination, count = keys.len(), ?operation, "Combining sorted sets into destination");
        match self.write(Command::SortedSetCombineStore {
            operation,
            destination: destination.to_string(),
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
            weights: None,
            aggregate: Aggregate::Sum,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("SortedSetCombineStore")),
        }
    }

    /// Expire the sorted set at an absolute instant.
    pub fn sorted_set_expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool> {
        self.expire("sorted_set", key, Expiry::At(at))
    }

    /// Expire the sorted set after `duration`.
    pub fn sorted_set_expire_in(&self, key: &str, duration: Duration) -> Result<bool> {
        self.expire("sorted_set", key, Expiry::In(duration))
    }
}
