//! Key-level operations shared by every family.

use tracing::{info, warn};

use super::{unexpected, Redkit};
use crate::guard;
use crate::serialize::Serializer;
use crate::{Command, Expiry, KeyType, Output, Result, When};

impl<S: Serializer> Redkit<S> {
    /// Rename a key.
    ///
    /// Returns `false` without touching the store's rename when `old` and
    /// `new` are the same key or `old` does not exist. An existing `new`
    /// key is overwritten.
    pub fn key_rename(&self, old: &str, new: &str) -> Result<bool> {
        guard::not_empty(old, "old")?;
        guard::not_empty(new, "new")?;
        if old == new {
            warn!(target: "redkit::keys", key = old, "Rename skipped: source and target are the same key");
            return Ok(false);
        }
        // Existence is checked with write flags too
        let exists = match self.write(Command::KeyExists {
            key: old.to_string(),
        })? {
            Output::Bool(b) => b,
            _ => return Err(unexpected("KeyExists")),
        };
        if !exists {
            warn!(target: "redkit::keys", key = old, "Rename skipped: key does not exist");
            return Ok(false);
        }
        info!(target: "redkit::keys", old, new, "Renaming key");
        match self.write(Command::KeyRename {
            key: old.to_string(),
            new_key: new.to_string(),
            when: When::Always,
        })? {
            Output::Bool(renamed) => Ok(renamed),
            _ => Err(unexpected("KeyRename")),
        }
    }

    /// Kind of value stored under `key` (`KeyType::None` when absent).
    pub fn key_type(&self, key: &str) -> Result<KeyType> {
        guard::not_empty(key, "key")?;
        match self.read(Command::KeyType {
            key: key.to_string(),
        })? {
            Output::KeyType(kind) => Ok(kind),
            _ => Err(unexpected("KeyType")),
        }
    }

    /// True when `key` holds a live value.
    pub fn key_exists(&self, key: &str) -> Result<bool> {
        guard::not_empty(key, "key")?;
        match self.read(Command::KeyExists {
            key: key.to_string(),
        })? {
            Output::Bool(b) => Ok(b),
            _ => Err(unexpected("KeyExists")),
        }
    }

    /// Delete keys, returning how many existed.
    pub(crate) fn delete_keys(&self, keys: Vec<String>) -> Result<i64> {
        match self.write(Command::KeyDelete { keys })? {
            Output::Int(n) => Ok(n),
            _ => Err(unexpected("KeyDelete")),
        }
    }

    /// Attach an expiry to an existing key of any kind.
    pub(crate) fn expire(&self, family: &'static str, key: &str, expiry: Expiry) -> Result<bool> {
        guard::not_empty(key, "key")?;
        let applied = match self.write(Command::KeyExpire {
            key: key.to_string(),
            expiry,
        })? {
            Output::Bool(b) => b,
            _ => return Err(unexpected("KeyExpire")),
        };
        if applied {
            info!(target: "redkit::keys", family, key, ?expiry, "Expiry set");
        } else {
            warn!(target: "redkit::keys", family, key, "Expiry not set: key does not exist");
        }
        Ok(applied)
    }
}
