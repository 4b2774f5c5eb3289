//! Hash operations.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::{unexpected, Redkit};
use crate::guard;
use crate::serialize::Serializer;
use crate::{Command, Expiry, HashEntry, Output, Result, When};

impl<S: Serializer> Redkit<S> {
    /// Set one field. Returns `true` if the field is new.
    pub fn hash_set<T: Serialize + ?Sized>(&self, key: &str, field: &str, value: &T) -> Result<bool> {
        self.hash_set_when(key, field, value, When::Always)
    }

    /// Set one field if the precondition on the field holds.
    ///
    /// With `When::NotExists` an existing field is left untouched and the
    /// result is `false`.
    pub fn hash_set_when<T: Serialize + ?Sized>(
        &self,
        key: &str,
        field: &str,
        value: &T,
        when: When,
    ) -> Result<bool> {
        guard::not_empty(key, "key")?;
        guard::not_empty(field, "field")?;
        let value = self.encode(value)?;
        info!(target: "redkit::hash", key, field, ?when, "Setting hash field");
        let written = match self.write(Command::HashSet {
            key: key.to_string(),
            field: field.to_string(),
            value,
            when,
        })? {
            Output::Bool(b) => b,
            _ => return Err(unexpected("HashSet")),
        };
        if !written {
            warn!(target: "redkit::hash", key, field, ?when, "Hash field not new or not written");
        }
        Ok(written)
    }

    /// Set several fields unconditionally.
    pub fn hash_set_range<F, T>(&self, key: &str, entries: &[(F, T)]) -> Result<()>
    where
        F: AsRef<str>,
        T: Serialize,
    {
        guard::not_empty(key, "key")?;
        let fields: Vec<&str> = entries.iter().map(|(f, _)| f.as_ref()).collect();
        guard::not_empty_all(&fields, "entries")?;
        let entries = entries
            .iter()
            .map(|(field, value)| {
                Ok(HashEntry {
                    field: field.as_ref().to_string(),
                    value: self.encode(value)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!(target: "redkit::hash", key, count = entries.len(), "Setting hash fields");
        match self.write(Command::HashSetMany {
            key: key.to_string(),
            entries,
        })? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("HashSetMany")),
        }
    }

    fn hash_delete<F: AsRef<str>>(&self, key: &str, fields: &[F]) -> Result<i64> {
        match self.write(Command::HashDelete {
            key: key.to_string(),
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("HashDelete")),
        }
    }

    /// Remove one field. Returns `true` if it existed.
    pub fn hash_remove(&self, key: &str, field: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        guard::not_empty(field, "field")?;
        info!(target: "redkit::hash", key, field, "Removing hash field");
        let removed = self.hash_delete(key, &[field])? > 0;
        if !removed {
            warn!(target: "redkit::hash", key, field, "Hash field not present");
        }
        Ok(removed)
    }

    /// Remove several fields. Returns how many existed.
    pub fn hash_remove_range<F: AsRef<str>>(&self, key: &str, fields: &[F]) -> Result<i64> {
        guard::not_empty(key, "key")?;
        guard::not_empty_all(fields, "fields")?;
        info!(target: "redkit::hash", key, count = fields.len(), "Removing hash fields");
        let removed = self.hash_delete(key, fields)?;
        if removed == 0 {
            warn!(target: "redkit::hash", key, "Hash fields not present");
        }
        Ok(removed)
    }

    /// Delete the whole hash. Returns `true` if it existed.
    pub fn hash_remove_all(&self, key: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::hash", key, "Removing hash");
        let removed = self.delete_keys(vec![key.to_string()])? > 0;
        if !removed {
            warn!(target: "redkit::hash", key, "Hash not present");
        }
        Ok(removed)
    }

    /// Field existence test.
    pub fn hash_exists(&self, key: &str, field: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        guard::not_empty(field, "field")?;
        match self.read(Command::HashExists {
            key: key.to_string(),
            field: field.to_string(),
        })? {
            Output::Bool(b) => Ok(b),
            _ => Err(unexpected("HashExists")),
        }
    }

    /// Number of fields.
    pub fn hash_count(&self, key: &str) -> Result<i64> {
        guard::not_empty(key, "key")?;
        match self.read(Command::HashLength {
            key: key.to_string(),
        })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("HashLength")),
        }
    }

    /// Value of one field; `T::default()` when absent.
    pub fn hash_get<T: DeserializeOwned + Default>(&self, key: &str, field: &str) -> Result<T> {
        guard::not_empty(key, "key")?;
        guard::not_empty(field, "field")?;
        info!(target: "redkit::hash", key, field, "Getting hash field");
        match self.read(Command::HashGet {
            key: key.to_string(),
            field: field.to_string(),
        })? {
            Output::Value(payload) => self.decode(payload),
            _ => Err(unexpected("HashGet")),
        }
    }

    /// Values of several fields. Absent fields are skipped.
    pub fn hash_get_many<T, F>(&self, key: &str, fields: &[F]) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Default,
        F: AsRef<str>,
    {
        guard::not_empty(key, "key")?;
        guard::not_empty_all(fields, "fields")?;
        info!(target: "redkit::hash", key, count = fields.len(), "Getting hash fields");
        match self.read(Command::HashGetMany {
            key: key.to_string(),
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        })? {
            Output::MaybeValues(payloads) => self.decode_present(payloads),
            _ => Err(unexpected("HashGetMany")),
        }
    }

    /// Every value, in the store's field order.
    pub fn hash_get_all<T: DeserializeOwned + Default>(&self, key: &str) -> Result<Vec<T>> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::hash", key, "Getting hash values");
        match self.read(Command::HashValues {
            key: key.to_string(),
        })? {
            Output::Values(payloads) => self.decode_all(payloads),
            _ => Err(unexpected("HashValues")),
        }
    }

    /// Every field with its raw, undecoded value.
    pub fn hash_get_all_entries(&self, key: &str) -> Result<Vec<HashEntry>> {
        guard::not_empty(key, "key")?;
        info!(target: "redkit::hash", key, "Getting hash entries");
        match self.read(Command::HashGetAll {
            key: key.to_string(),
        })? {
            Output::HashEntries(entries) => Ok(entries),
            _ => Err(unexpected("HashGetAll")),
        }
    }

    /// Expire the hash at an absolute instant.
    pub fn hash_expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<bool> {
        self.expire("hash", key, Expiry::At(at))
    }

    /// Expire the hash after `duration`.
    pub fn hash_expire_in(&self, key: &str, duration: Duration) -> Result<bool> {
        self.expire("hash", key, Expiry::In(duration))
    }
}
