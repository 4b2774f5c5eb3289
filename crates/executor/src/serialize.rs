//! Serialization spine
//!
//! Typed values travel to the store as [`Payload`]s. A [`Serializer`] turns
//! values into bytes and back; [`to_payload`] and [`from_payload`] add the
//! null/empty rules every facade operation shares:
//!
//! - a value that encodes to the engine's null (`None`, `()`) becomes the
//!   empty payload;
//! - an empty payload (absent key, missing field) decodes to `T::default()`.
//!
//! "Key absent" and "value stored as null" are therefore the same
//! observable state.

use redkit_core::Payload;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::SerializerKind;
use crate::{Error, Result};

/// Converts typed values to and from payload bytes
pub trait Serializer: Send + Sync {
    /// Encode a value
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Payload>;

    /// Decode a value
    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// This engine's encoding of null
    fn null_payload(&self) -> &'static [u8];
}

/// JSON via `serde_json`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Payload> {
        serde_json::to_vec(value)
            .map(Payload::new)
            .map_err(|e| Error::serialization(format!("JSON encode failed: {}", e)))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::serialization(format!("JSON decode failed: {}", e)))
    }

    fn null_payload(&self) -> &'static [u8] {
        b"null"
    }
}

/// MessagePack via `rmp-serde`, structs encoded as maps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessagePackSerializer;

impl Serializer for MessagePackSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Payload> {
        rmp_serde::to_vec_named(value)
            .map(Payload::new)
            .map_err(|e| Error::serialization(format!("MessagePack encode failed: {}", e)))
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        rmp_serde::from_slice(bytes)
            .map_err(|e| Error::serialization(format!("MessagePack decode failed: {}", e)))
    }

    fn null_payload(&self) -> &'static [u8] {
        &[0xc0]
    }
}

/// Engine picked at runtime from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredSerializer {
    /// JSON
    Json(JsonSerializer),
    /// MessagePack
    MessagePack(MessagePackSerializer),
}

impl From<SerializerKind> for ConfiguredSerializer {
    fn from(kind: SerializerKind) -> Self {
        match kind {
            SerializerKind::Json => ConfiguredSerializer::Json(JsonSerializer),
            SerializerKind::MessagePack => ConfiguredSerializer::MessagePack(MessagePackSerializer),
        }
    }
}

impl Serializer for ConfiguredSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Payload> {
        match self {
            ConfiguredSerializer::Json(s) => s.serialize(value),
            ConfiguredSerializer::MessagePack(s) => s.serialize(value),
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            ConfiguredSerializer::Json(s) => s.deserialize(bytes),
            ConfiguredSerializer::MessagePack(s) => s.deserialize(bytes),
        }
    }

    fn null_payload(&self) -> &'static [u8] {
        match self {
            ConfiguredSerializer::Json(s) => s.null_payload(),
            ConfiguredSerializer::MessagePack(s) => s.null_payload(),
        }
    }
}

/// Encode a value, mapping null to the empty payload.
pub fn to_payload<S, T>(serializer: &S, value: &T) -> Result<Payload>
where
    S: Serializer + ?Sized,
    T: Serialize + ?Sized,
{
    let payload = serializer.serialize(value)?;
    if payload.as_bytes() == serializer.null_payload() {
        return Ok(Payload::empty());
    }
    Ok(payload)
}

/// Decode a payload, mapping the empty payload to `T::default()`.
pub fn from_payload<S, T>(serializer: &S, payload: &Payload) -> Result<T>
where
    S: Serializer + ?Sized,
    T: DeserializeOwned + Default,
{
    if payload.is_empty() {
        return Ok(T::default());
    }
    serializer.deserialize(payload.as_bytes())
}
