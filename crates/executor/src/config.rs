//! Facade configuration via `redkit.toml`
//!
//! The config file picks the serialization engine and the default routing
//! flags for reads and writes. Every field is optional; a missing file
//! section falls back to the documented defaults.

use std::path::Path;

use redkit_core::CommandFlags;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "redkit.toml";

/// Default routing flags applied when a call does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Flags for read operations (default: `prefer_replica`)
    #[serde(default = "default_read")]
    pub read: CommandFlags,
    /// Flags for write operations (default: `demand_primary`)
    #[serde(default = "default_write")]
    pub write: CommandFlags,
}

fn default_read() -> CommandFlags {
    CommandFlags::READ_DEFAULT
}

fn default_write() -> CommandFlags {
    CommandFlags::WRITE_DEFAULT
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            read: default_read(),
            write: default_write(),
        }
    }
}

/// Serialization engine named in the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializerKind {
    /// `"json"`
    Json,
    /// `"msgpack"`
    MessagePack,
}

/// Facade configuration loaded from `redkit.toml`.
///
/// # Example
///
/// ```toml
/// serializer = "json"
///
/// [routing]
/// read = "prefer_replica"
/// write = "demand_primary"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedkitConfig {
    /// Serialization engine: `"json"` or `"msgpack"`.
    #[serde(default = "default_serializer_str")]
    pub serializer: String,
    /// Default routing flags.
    #[serde(default)]
    pub routing: RoutingPolicy,
}

fn default_serializer_str() -> String {
    "json".to_string()
}

impl Default for RedkitConfig {
    fn default() -> Self {
        Self {
            serializer: default_serializer_str(),
            routing: RoutingPolicy::default(),
        }
    }
}

impl RedkitConfig {
    /// Parse the serializer string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"json"` or `"msgpack"`.
    pub fn serializer_kind(&self) -> Result<SerializerKind> {
        match self.serializer.as_str() {
            "json" => Ok(SerializerKind::Json),
            "msgpack" => Ok(SerializerKind::MessagePack),
            other => Err(Error::invalid_argument(
                "serializer",
                format!(
                    "invalid serializer '{}' in {}. Expected \"json\" or \"msgpack\".",
                    other, CONFIG_FILE_NAME
                ),
            )),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Redkit configuration
#
# Serialization engine: "json" (default) or "msgpack"
serializer = "json"

# Routing flags passed with every command unless a call overrides them.
# One of: "none", "prefer_primary", "demand_primary",
#         "prefer_replica", "demand_replica"
[routing]
read = "prefer_replica"
write = "demand_primary"
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RedkitConfig = toml::from_str(content).map_err(|e| {
            Error::invalid_argument("config", format!("failed to parse config: {}", e))
        })?;
        config.serializer_kind()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::internal(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::internal(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::internal(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
