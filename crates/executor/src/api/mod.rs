//! High-level typed facade over a store connection.
//!
//! The [`Redkit`] struct turns typed method calls into [`Command`]s, runs
//! them on a connection obtained from its [`ConnectionProvider`], and turns
//! the [`Output`]s back into typed results through the serialization spine.
//!
//! ## Routing
//!
//! Every command carries [`CommandFlags`]. Reads use the policy's read flag
//! (`PreferReplica` by default), writes its write flag (`DemandPrimary` by
//! default). [`Redkit::with_flags`] returns a facade that passes one flag
//! for everything.
//!
//! # Example
//!
//! ```
//! use redkit_executor::Redkit;
//! use redkit_storage::MemoryStore;
//!
//! let store = MemoryStore::shared();
//! let redkit = Redkit::new(store.clone());
//!
//! redkit.item_set("greeting", "hello").unwrap();
//! let greeting: String = redkit.item_get("greeting").unwrap();
//! assert_eq!(greeting, "hello");
//! ```

mod hash;
mod item;
mod keys;
mod list;
mod set;
mod sorted_set;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{RedkitConfig, RoutingPolicy};
use crate::serialize::{from_payload, to_payload, ConfiguredSerializer, JsonSerializer, Serializer};
use crate::{Command, CommandFlags, ConnectionProvider, Error, Exclude, Expiry, Output, Payload, Result, When};

/// Options for a string write.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SetOptions {
    /// Expiration (default: none)
    pub expiry: Option<Expiry>,
    /// Precondition on the key's existence (default: `Always`)
    pub when: When,
}

impl SetOptions {
    /// Expire at an absolute instant.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expiry = Some(Expiry::At(at));
        self
    }

    /// Expire after a duration.
    pub fn expires_in(mut self, duration: std::time::Duration) -> Self {
        self.expiry = Some(Expiry::In(duration));
        self
    }

    /// Write only when the precondition holds.
    pub fn when(mut self, when: When) -> Self {
        self.when = when;
        self
    }
}

/// Score bounds for sorted-set range reads.
///
/// Defaults to the whole range, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    /// Lower bound
    pub start: f64,
    /// Upper bound
    pub stop: f64,
    /// Which bounds are exclusive
    pub exclude: Exclude,
}

impl ScoreRange {
    /// Inclusive range `[start, stop]`.
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start,
            stop,
            exclude: Exclude::None,
        }
    }

    /// Make one or both bounds exclusive.
    pub fn exclude(mut self, exclude: Exclude) -> Self {
        self.exclude = exclude;
        self
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }
}

/// Typed facade for store operations.
///
/// `Redkit` holds no data and no locks: each method is one or two
/// independent round trips. It is `Send + Sync` and cheap to clone when the
/// serializer is.
///
/// The serializer is a type parameter; [`Redkit::new`] uses JSON and
/// [`Redkit::from_config`] picks one at runtime.
#[derive(Clone)]
pub struct Redkit<S: Serializer = JsonSerializer> {
    provider: Arc<dyn ConnectionProvider>,
    serializer: S,
    routing: RoutingPolicy,
    flags: Option<CommandFlags>,
}

impl Redkit<JsonSerializer> {
    /// Create a JSON facade with the default routing policy.
    pub fn new<P: ConnectionProvider + 'static>(provider: P) -> Self {
        Self::with_provider(Arc::new(provider), JsonSerializer)
    }
}

impl Redkit<ConfiguredSerializer> {
    /// Create a facade from a parsed config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config names an unknown serializer.
    pub fn from_config<P: ConnectionProvider + 'static>(
        provider: P,
        config: &RedkitConfig,
    ) -> Result<Self> {
        let serializer = ConfiguredSerializer::from(config.serializer_kind()?);
        Ok(Self::with_provider(Arc::new(provider), serializer).with_routing(config.routing))
    }
}

impl<S: Serializer> Redkit<S> {
    /// Create a facade over a shared provider with an explicit serializer.
    pub fn with_provider(provider: Arc<dyn ConnectionProvider>, serializer: S) -> Self {
        Self {
            provider,
            serializer,
            routing: RoutingPolicy::default(),
            flags: None,
        }
    }

    /// Swap the serialization engine.
    pub fn with_serializer<S2: Serializer>(self, serializer: S2) -> Redkit<S2> {
        Redkit {
            provider: self.provider,
            serializer,
            routing: self.routing,
            flags: self.flags,
        }
    }

    /// Replace the default routing policy.
    pub fn with_routing(mut self, routing: RoutingPolicy) -> Self {
        self.routing = routing;
        self
    }

    /// A facade that sends `flags` with every command instead of the
    /// policy defaults.
    pub fn with_flags(&self, flags: CommandFlags) -> Self
    where
        S: Clone,
    {
        Self {
            flags: Some(flags),
            ..self.clone()
        }
    }

    /// Current routing policy.
    pub fn routing(&self) -> RoutingPolicy {
        self.routing
    }

    /// The serialization engine.
    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    // =========================================================================
    // Command plumbing shared by the families
    // =========================================================================

    fn execute(&self, cmd: Command, default_flags: CommandFlags) -> Result<Output> {
        let flags = self.flags.unwrap_or(default_flags);
        self.provider.connection()?.execute(cmd, flags)
    }

    pub(crate) fn read(&self, cmd: Command) -> Result<Output> {
        self.execute(cmd, self.routing.read)
    }

    pub(crate) fn write(&self, cmd: Command) -> Result<Output> {
        self.execute(cmd, self.routing.write)
    }

    pub(crate) fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Payload> {
        to_payload(&self.serializer, value)
    }

    pub(crate) fn encode_all<T: Serialize>(&self, values: &[T]) -> Result<Vec<Payload>> {
        values.iter().map(|v| self.encode(v)).collect()
    }

    pub(crate) fn decode<T: DeserializeOwned + Default>(&self, payload: Option<Payload>) -> Result<T> {
        match payload {
            Some(payload) => from_payload(&self.serializer, &payload),
            None => Ok(T::default()),
        }
    }

    /// Decode a collection read. Empty payloads are skipped, as they are
    /// for multi-gets.
    pub(crate) fn decode_all<T: DeserializeOwned + Default>(&self, payloads: Vec<Payload>) -> Result<Vec<T>> {
        payloads
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| from_payload(&self.serializer, p))
            .collect()
    }

    /// Decode only the slots holding a non-empty payload.
    pub(crate) fn decode_present<T: DeserializeOwned + Default>(
        &self,
        payloads: Vec<Option<Payload>>,
    ) -> Result<Vec<T>> {
        payloads
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .map(|p| from_payload(&self.serializer, &p))
            .collect()
    }
}

pub(crate) fn unexpected(command: &str) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}", command),
    }
}

/// Rank window of a 1-based page: `[(page-1)*size, page*size-1]`.
pub(crate) fn page_window(page: i64, page_size: i64) -> Result<(i64, i64)> {
    let start = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| Error::invalid_argument("page", "page window overflows"))?;
    let stop = start
        .checked_add(page_size - 1)
        .ok_or_else(|| Error::invalid_argument("page", "page window overflows"))?;
    Ok((start, stop))
}
