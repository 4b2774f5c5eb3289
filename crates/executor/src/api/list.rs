//! List operations.
//!
//! Index 0 is the leftmost element and -1 the rightmost.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::{unexpected, Redkit};
use crate::guard;
use crate::serialize::Serializer;
use crate::{Command, Expiry, InsertPosition, ListSide, Output, Payload, Result, When};

impl<S: Serializer> Redkit<S> {
    fn list_insert<T, P>(&self, key: &str, value: &T, pivot: &P, position: InsertPosition) -> Result<i64>
    where
        T: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        guard::not_empty(key, "key")?;
        let value = self.encode(value)?;
        let pivot = self.encode(pivot)?;
        info!(target: "redkit::list", key, ?position, "Inserting list value");
        let len = match self.write(Command::ListInsert {
            key: key.to_string(),
            position,
            pivot,
            value,
        })? {
            Output::Int(n) => n,
            _ => return Err(unexpected("ListInsert")),
        };
        match len {
            -1 => warn!(target: "redkit::list", key, "List insert skipped: pivot not found"),
            0 => warn!(target: "redkit::list", key, "List insert skipped: key does not exist"),
            _ => {}
        }
        Ok(len)
    }

    /// Insert `value` before the first occurrence of `pivot`.
    ///
    /// Returns the new length, -1 when the pivot is missing and 0 when the
    /// list does not exist.
    pub fn list_insert_left<T, P>(&self, key: &str, value: &T, pivot: &P) -> Result<i64>
    where
        T: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        self.list_insert(key, value, pivot, InsertPosition::Before)
    }

    /// Insert `value` after the first occurrence of `pivot`.
    pub fn list_insert_right<T, P>(&self, key: &str, value: &T, pivot: &P) -> Result<i64>
    where
        T: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        self.list_insert(key, value, pivot, InsertPosition::After)
    }

    fn list_push(&self, key: &str, side: ListSide, values: Vec<Payload>, when: When) -> Result<i64> {
        info!(target: "redkit::list", key, ?side, count = values.len(), ?when, "Pushing list values");
        let len = match self.write(Command::ListPush {
            key: key.to_string(),
            side,
            values,
            when,
        })? {
            Output::Int(n) => n,
            _ => return Err(unexpected("ListPush")),
        };
        if len == 0 {
            warn!(target: "redkit::list", key, ?when, "List push refused by precondition");
        }
        Ok(len)
    }

    /// Push one value onto the head. Returns the new length.
    pub fn list_left_push<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64> {
        self.list_left_push_when(key, value, When::Always)
    }

    /// Push one value onto the head if the precondition holds.
    ///
    /// `When::Exists` only pushes onto an existing list. Returns 0 when the
    /// push was refused.
    pub fn list_left_push_when<T: Serialize + ?Sized>(&self, key: &str, value: &T, when: When) -> Result<i64> {
        guard::not_empty(key, "key")?;
        let payload = self.encode(value)?;
        self.list_push(key, ListSide::Left, vec![payload], when)
    }

    /// Push one value onto the tail. Returns the new length.
    pub fn list_right_push<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64> {
        self.list_right_push_when(key, value, When::Always)
    }

    /// Push one value onto the tail if the precondition holds.
    pub fn list_right_push_when<T: Serialize + ?Sized>(&self, key: &str, value: &T, when: When) -> Result<i64> {
        guard::not_empty(key, "key")?;
        let payload = self.encode(value)?;
        self.list_push(key, ListSide::Right, vec![payload], when)
    }

    /// Push values onto the head one after another, so the last value ends
    /// up first. An empty slice returns 0 without contacting the store.
    pub fn list_left_push_range<T: Serialize>(&self, key: &str, values: &[T]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        if values.is_empty() {
            warn!(target: "redkit::list", key, "List push skipped: no values");
            return Ok(0);
        }
        let payloads = self.encode_all(values)?;
        self.list_push(key, ListSide::Left, payloads, When::Always)
    }

    /// Push values onto the tail in order. An empty slice returns 0 without
    /// contacting the store.
    pub fn list_right_push_range<T: Serialize>(&self, key: &str, values: &[T]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        if values.is_empty() {
            warn!(target: "redkit::list", key, "List push skipped: no values");
            return Ok(0);
        }
        let payloads = self.encode_all(values)?;
        self.list_push(key, ListSide::Right, payloads, When::Always)
    }

    fn list_pop<T: DeserializeOwned + Default>(&self, key: &str, side: ListSide) -> Result<T> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::list", key, ?side, "Popping list value");
        match self.write(Command::ListPop {
            key: key.to_string(),
            side,
        })? {
            Output::Value(payload) => {
                if payload.is_none() {
                    warn!(target: "redkit::list", key, "List pop on empty list");
                }
                self.decode(payload)
            }
            _ => Err(unexpected("ListPop")),
        }
    }

    /// Pop the head; `T::default()` when the list is empty.
    pub fn list_left_pop<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        self.list_pop(key, ListSide::Left)
    }

    /// Pop the tail; `T::default()` when the list is empty.
    pub fn list_right_pop<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        self.list_pop(key, ListSide::Right)
    }

    /// Remove every occurrence of `value`. Returns how many were removed.
    pub fn list_remove<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<i64> {
        guard::not_empty(key, "key")?;
        let value = self.encode(value)?;
        info!(target: "redkit::list", key, "Removing list value");
        match self.write(Command::ListRemove {
            key: key.to_string(),
            value,
            count: 0,
        })? {
            Output::Int(0) => {
                warn!(target: "redkit::list", key, "List remove matched nothing");
                Ok(0)
            }
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("ListRemove")),
        }
    }

    /// Delete the whole list. Returns `true` if it existed.
    pub fn list_remove_all(&self, key: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::list", key, "Removing list");
        let removed = self.delete_keys(vec![key.to_string()])? > 0;
        if !removed {
            warn!(target: "redkit::list", key, "List not present");
        }
        Ok(removed)
    }

    /// Number of elements.
    pub fn list_count(&self, key: &str) -> Result<i64> {
        guard::not_empty(key, "key")?;
        match self.read(Command::ListLength {
            key: key.to_string(),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("ListLength")),
        }
    }

    /// Element at `index`; `T::default()` when out of range.
    pub fn list_get_by_index<T: DeserializeOwned + Default>(&self, key: &str, index: i64) -> Result<T> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::list", key, index, "Getting list value");
        match self.read(Command::ListIndex {
            key: key.to_string(),
            index,
        })? {
            Output::Value(payload) => self.decode(payload),
            _ => Err(unexpected("ListIndex")),
        }
    }

    /// Every element, head first.
    pub fn list_get_all<T: DeserializeOwned + Default>(&self, key: &str) -> Result<Vec<T>> {
        self.list_get_range(key, 0, -1)
    }

    /// Elements between `start` and `stop`, both inclusive.
    pub fn list_get_range<T: DeserializeOwned + Default>(&self, key: &str, start: i64, stop: i64) -> Result<Vec<T>> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::list", key, start, stop, "Getting list range");
        match self.read(Command::ListRange {
            key: key.to_string(),
            start,
            stop,
        })? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("ListRange")),
        }
    }

    /// Expire the list at an absolute instant.
    pub fn list_expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool> {
        self.expire("list", key, Expiry::At(at))
    }

    /// Expire the list after `duration`.
    pub fn list_expire_in(&self, key: &str, duration: Duration) -> Result<bool> {
        self.expire("list", key, Expiry::In(duration))
    }
}
