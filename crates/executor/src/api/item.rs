//! String/item operations: single typed values and counters.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::{unexpected, Redkit, SetOptions};
use crate::guard;
use crate::serialize::Serializer;
use crate::{Command, Error, Output, Result, When};

impl<S: Serializer> Redkit<S> {
    // =========================================================================
    // Writes
    // =========================================================================

    /// Store a value, overwriting any previous value and clearing its expiry.
    ///
    /// A null value (`None`, `()`) is stored as an empty payload and reads
    /// back as `T::default()`.
    pub fn item_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<bool> {
        self.item_set_with(key, value, SetOptions::default())
    }

    /// Store a value only if the precondition on the key holds.
    pub fn item_set_when<T: Serialize + ?Sized>(&self, key: &str, value: &T, when: When) -> Result<bool> {
        self.item_set_with(key, value, SetOptions::default().when(when))
    }

    /// Store a value that expires at an absolute instant.
    ///
    /// An instant in the past makes the key expire immediately.
    pub fn item_set_expires_at<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        self.item_set_with(key, value, SetOptions::default().expires_at(at))
    }

    /// Store a value that expires after `duration`.
    pub fn item_set_expires_in<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        duration: Duration,
    ) -> Result<bool> {
        self.item_set_with(key, value, SetOptions::default().expires_in(duration))
    }

    /// Store a value with explicit options.
    ///
    /// Returns `false` when the precondition refused the write.
    pub fn item_set_with<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: SetOptions,
    ) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let payload = self.encode(value)?;
        info!(
            target: "redkit::item",
            key,
            bytes = payload.len(),
            expiry = ?options.expiry,
            when = ?options.when,
            "Setting item"
        );
        let written = match self.write(Command::StringSet {
            key: key.to_string(),
            value: payload,
            expiry: options.expiry,
            when: options.when,
        })? {
            Output::Bool(b) => b,
            _ => return Err(unexpected("StringSet")),
        };
        if !written {
            warn!(target: "redkit::item", key, when = ?options.when, "Item not set: precondition failed");
        }
        Ok(written)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read a value; `T::default()` when the key is absent.
    pub fn item_get<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::item", key, "Getting item");
        match self.read(Command::StringGet {
            key: key.to_string(),
        })? {
            Output::Value(payload) => self.decode(payload),
            _ => Err(unexpected("StringGet")),
        }
    }

    /// Read several values at once.
    ///
    /// Absent keys are skipped, so the result can be shorter than `keys`.
    /// Present values keep the order the store returned them in.
    pub fn item_get_many<T, K>(&self, keys: &[K]) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Default,
        K: AsRef<str>,
    {
        guard::not_empty_all(keys, "keys")?;
        info!(target: "redkit::item", count = keys.len(), "Getting items");
        match self.read(Command::StringGetMany {
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
        })? {
            Output::MaybeValues(payloads) => self.decode_present(payloads),
            _ => Err(unexpected("StringGetMany")),
        }
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove a key of any kind. Returns `true` if it existed.
    pub fn item_remove(&self, key: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::item", key, "Removing item");
        let removed = self.delete_keys(vec![key.to_string()])? > 0;
        if !removed {
            warn!(target: "redkit::item", key, "Item not removed: key does not exist");
        }
        Ok(removed)
    }

    /// Remove several keys. Returns how many existed.
    pub fn item_remove_many<K: AsRef<str>>(&self, keys: &[K]) -> Result<i64> {
        guard::not_empty_all(keys, "keys")?;
        info!(target: "redkit::item", count = keys.len(), "Removing items");
        self.delete_keys(keys.iter().map(|k| k.as_ref().to_string()).collect())
    }

    // =========================================================================
    // Counters
    // =========================================================================

    /// Add one to an integer counter, creating it at 0 first if absent.
    pub fn increment(&self, key: &str) -> Result<i64> {
        self.increment_by(key, 1)
    }

    /// Add `amount` to an integer counter. Returns the new value.
    ///
    /// Fails with a store error when the key holds something that is not an
    /// integer.
    pub fn increment_by(&self, key: &str, amount: i64) -> Result<i64> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::item", key, amount, "Incrementing counter");
        match self.write(Command::StringIncrement {
            key: key.to_string(),
            delta: amount,
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("StringIncrement")),
        }
    }

    /// Add `amount` to a floating-point counter. Returns the new value.
    pub fn increment_by_float(&self, key: &str, amount: f64) -> Result<f64> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::item", key, amount, "Incrementing float counter");
        match self.write(Command::StringIncrementFloat {
            key: key.to_string(),
            delta: amount,
        })? {
            Output::Float(f) => Ok(f),
            _ => Err(unexpected("StringIncrementFloat")),
        }
    }

    /// Subtract one from an integer counter.
    pub fn decrement(&self, key: &str) -> Result<i64> {
        self.decrement_by(key, 1)
    }

    /// Subtract `amount` from an integer counter. Returns the new value.
    pub fn decrement_by(&self, key: &str, amount: i64) -> Result<i64> {
        let delta = amount
            .checked_neg()
            .ok_or_else(|| Error::invalid_argument("amount", "cannot be negated"))?;
        self.increment_by(key, delta)
    }

    /// Subtract `amount` from a floating-point counter.
    pub fn decrement_by_float(&self, key: &str, amount: f64) -> Result<f64> {
        self.increment_by_float(key, -amount)
    }
}
