//! MemoryStore: in-process execution of Redkit commands
//!
//! `MemoryStore` owns one [`Keyspace`] behind a mutex. Every [`Command`] runs
//! to completion while holding the lock, so each command is atomic with
//! respect to every other command on the same store.
//!
//! The store also records what it was asked to do: the [`CommandFlags`] of
//! the most recent command, a running command count, and (opt-in) a log of
//! command names with their flags. It can be switched offline to exercise
//! connection-failure paths.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use redkit_core::{Command, CommandFlags, Connection, Error, Output, Result};
use tracing::debug;

use crate::handlers::{hashes, keys, lists, sets, sorted_sets, strings};
use crate::keyspace::Keyspace;

/// In-memory reference store
///
/// # Thread Safety
///
/// `MemoryStore` is `Send + Sync` and is usually shared as `Arc<MemoryStore>`,
/// which is itself a [`redkit_core::ConnectionProvider`].
///
/// # Example
///
/// ```
/// use redkit_core::{Command, CommandFlags, Connection, Output};
/// use redkit_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// store
///     .execute(
///         Command::SetAdd { key: "s".into(), members: vec!["a".into()] },
///         CommandFlags::DemandPrimary,
///     )
///     .unwrap();
/// let out = store
///     .execute(Command::SetLength { key: "s".into() }, CommandFlags::PreferReplica)
///     .unwrap();
/// assert_eq!(out, Output::Int(1));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyspace: Mutex<Keyspace>,
    last_flags: Mutex<Option<CommandFlags>>,
    command_log: Option<Mutex<Vec<(&'static str, CommandFlags)>>>,
    commands_executed: AtomicU64,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store ready to hand to a facade
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Keep a log of every executed command name and its flags
    pub fn with_command_log(mut self) -> Self {
        self.command_log = Some(Mutex::new(Vec::new()));
        self
    }

    /// Command names and flags seen so far, oldest first.
    ///
    /// Empty unless the store was built with [`MemoryStore::with_command_log`].
    pub fn command_log(&self) -> Vec<(&'static str, CommandFlags)> {
        self.command_log
            .as_ref()
            .map(|log| log.lock().clone())
            .unwrap_or_default()
    }

    /// Routing flags of the most recent command
    pub fn last_flags(&self) -> Option<CommandFlags> {
        *self.last_flags.lock()
    }

    /// Number of commands executed
    pub fn commands_executed(&self) -> u64 {
        self.commands_executed.load(Ordering::Relaxed)
    }

    /// While offline every command fails with [`Error::Connection`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Drop every expired key now. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let purged = self.keyspace.lock().purge_expired();
        if purged > 0 {
            debug!(target: "redkit::store", purged, "Purged expired keys");
        }
        purged
    }

    /// Number of stored keys, including expired keys not yet purged
    pub fn len(&self) -> usize {
        self.keyspace.lock().len()
    }

    /// True when no keys are stored
    pub fn is_empty(&self) -> bool {
        self.keyspace.lock().is_empty()
    }

    /// Remove every key
    pub fn flush(&self) {
        self.keyspace.lock().clear();
    }

    fn record(&self, name: &'static str, flags: CommandFlags) {
        self.commands_executed.fetch_add(1, Ordering::Relaxed);
        *self.last_flags.lock() = Some(flags);
        if let Some(log) = &self.command_log {
            log.lock().push((name, flags));
        }
    }

    fn dispatch(ks: &mut Keyspace, cmd: Command) -> Result<Output> {
        match cmd {
            // Keys
            Command::KeyDelete { keys } => keys::key_delete(ks, keys),
            Command::KeyExists { key } => keys::key_exists(ks, key),
            Command::KeyType { key } => keys::key_type(ks, key),
            Command::KeyRename { key, new_key, when } => keys::key_rename(ks, key, new_key, when),
            Command::KeyExpire { key, expiry } => keys::key_expire(ks, key, expiry),

            // Strings
            Command::StringSet {
                key,
                value,
                expiry,
                when,
            } => strings::string_set(ks, key, value, expiry, when),
            Command::StringGet { key } => strings::string_get(ks, key),
            Command::StringGetMany { keys } => strings::string_get_many(ks, keys),
            Command::StringIncrement { key, delta } => strings::string_increment(ks, key, delta),
            Command::StringIncrementFloat { key, delta } => {
                strings::string_increment_float(ks, key, delta)
            }

            // Lists
            Command::ListInsert {
                key,
                position,
                pivot,
                value,
            } => lists::list_insert(ks, key, position, pivot, value),
            Command::ListPush {
                key,
                side,
                values,
                when,
            } => lists::list_push(ks, key, side, values, when),
            Command::ListPop { key, side } => lists::list_pop(ks, key, side),
            Command::ListRemove { key, value, count } => lists::list_remove(ks, key, value, count),
            Command::ListLength { key } => lists::list_length(ks, key),
            Command::ListIndex { key, index } => lists::list_index(ks, key, index),
            Command::ListRange { key, start, stop } => lists::list_range(ks, key, start, stop),

            // Sets
            Command::SetAdd { key, members } => sets::set_add(ks, key, members),
            Command::SetRemove { key, members } => sets::set_remove(ks, key, members),
            Command::SetMembers { key } => sets::set_members(ks, key),
            Command::SetContains { key, member } => sets::set_contains(ks, key, member),
            Command::SetLength { key } => sets::set_length(ks, key),
            Command::SetCombine { operation, keys } => sets::set_combine(ks, operation, keys),
            Command::SetCombineStore {
                operation,
                destination,
                keys,
            } => sets::set_combine_store(ks, operation, destination, keys),
            Command::SetMove {
                source,
                destination,
                member,
            } => sets::set_move(ks, source, destination, member),

            // Sorted sets
            Command::SortedSetAdd { key, entries } => sorted_sets::sorted_set_add(ks, key, entries),
            Command::SortedSetIncrement { key, member, delta } => {
                sorted_sets::sorted_set_increment(ks, key, member, delta)
            }
            Command::SortedSetRemove { key, members } => {
                sorted_sets::sorted_set_remove(ks, key, members)
            }
            Command::SortedSetRemoveRangeByRank { key, start, stop } => {
                sorted_sets::sorted_set_remove_range_by_rank(ks, key, start, stop)
            }
            Command::SortedSetRemoveRangeByScore {
                key,
                start,
                stop,
                exclude,
            } => sorted_sets::sorted_set_remove_range_by_score(ks, key, start, stop, exclude),
            Command::SortedSetLength {
                key,
                min,
                max,
                exclude,
            } => sorted_sets::sorted_set_length(ks, key, min, max, exclude),
            Command::SortedSetScore { key, member } => {
                sorted_sets::sorted_set_score(ks, key, member)
            }
            Command::SortedSetRangeByRank {
                key,
                start,
                stop,
                order,
                with_scores,
            } => sorted_sets::sorted_set_range_by_rank(ks, key, start, stop, order, with_scores),
            Command::SortedSetRangeByScore {
                key,
                start,
                stop,
                exclude,
                order,
                skip,
                take,
                with_scores,
            } => sorted_sets::sorted_set_range_by_score(
                ks,
                key,
                start,
                stop,
                exclude,
                order,
                skip,
                take,
                with_scores,
            ),
            Command::SortedSetCombineStore {
                operation,
                destination,
                keys,
                weights,
                aggregate,
            } => sorted_sets::sorted_set_combine_store(
                ks,
                operation,
                destination,
                keys,
                weights,
                aggregate,
            ),

            // Hashes
            Command::HashSet {
                key,
                field,
                value,
                when,
            } => hashes::hash_set(ks, key, field, value, when),
            Command::HashSetMany { key, entries } => hashes::hash_set_many(ks, key, entries),
            Command::HashDelete { key, fields } => hashes::hash_delete(ks, key, fields),
            Command::HashExists { key, field } => hashes::hash_exists(ks, key, field),
            Command::HashLength { key } => hashes::hash_length(ks, key),
            Command::HashGet { key, field } => hashes::hash_get(ks, key, field),
            Command::HashGetMany { key, fields } => hashes::hash_get_many(ks, key, fields),
            Command::HashValues { key } => hashes::hash_values(ks, key),
            Command::HashGetAll { key } => hashes::hash_get_all(ks, key),
        }
    }
}

impl Connection for MemoryStore {
    fn execute(&self, cmd: Command, flags: CommandFlags) -> Result<Output> {
        let name = cmd.name();
        if self.offline.load(Ordering::Relaxed) {
            return Err(Error::Connection {
                reason: "store is offline".to_string(),
            });
        }
        self.record(name, flags);

        let result = {
            let mut ks = self.keyspace.lock();
            Self::dispatch(&mut ks, cmd)
        };
        match &result {
            Ok(output) => debug!(
                target: "redkit::store",
                command = name,
                ?flags,
                output = output.name(),
                "Executed command"
            ),
            Err(e) => debug!(
                target: "redkit::store",
                command = name,
                ?flags,
                error = %e,
                "Command failed"
            ),
        }
        result
    }
}
