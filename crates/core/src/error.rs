//! Error types shared by the facade and the store.
//!
//! All failures are represented by the [`Error`] enum. Errors are:
//! - **Structured**: each variant has typed fields for the details
//! - **Serializable**: they can cross a wire as JSON
//! - **Unmodified in transit**: the facade propagates store errors as-is

use serde::{Deserialize, Serialize};

/// Result type alias for Redkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Redkit errors.
///
/// # Categories
///
/// | Category | Variants | Raised by |
/// |----------|----------|-----------|
/// | Argument | `InvalidArgument` | Validation, before any store call |
/// | Type | `WrongType` | Store |
/// | Store | `Store` | Store rejected the command |
/// | Transport | `Connection` | Connection provider |
/// | Serialization | `Serialization` | Serialization spine |
/// | System | `Internal` | Unexpected output (bug) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Argument Errors ====================
    /// A required argument was empty or out of range
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    // ==================== Store Errors ====================
    /// Operation against a key holding the wrong kind of value
    #[error("wrong type for key '{key}': expected {expected}, got {actual}")]
    WrongType {
        key: String,
        expected: String,
        actual: String,
    },

    /// The store rejected the command
    #[error("store error: {reason}")]
    Store { reason: String },

    /// No usable connection to the store
    #[error("connection error: {reason}")]
    Connection { reason: String },

    // ==================== System Errors ====================
    /// A value could not be serialized or a payload could not be decoded
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Build an [`Error::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`Error::Store`].
    pub fn store(reason: impl Into<String>) -> Self {
        Error::Store {
            reason: reason.into(),
        }
    }

    /// Build an [`Error::Serialization`].
    pub fn serialization(reason: impl Into<String>) -> Self {
        Error::Serialization {
            reason: reason.into(),
        }
    }

    /// Build an [`Error::Internal`].
    pub fn internal(reason: impl Into<String>) -> Self {
        Error::Internal {
            reason: reason.into(),
        }
    }

    /// True for errors raised before the store was contacted.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}
