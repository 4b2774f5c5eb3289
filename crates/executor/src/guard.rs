//! Argument validation
//!
//! Every public facade operation validates its required arguments here
//! before composing a command, so a rejected call never reaches the store.

use std::fmt::Display;

use crate::{Error, Result};

/// Reject an empty key or field name.
pub fn not_empty(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}

/// Reject an empty collection, or one containing an empty key.
pub fn not_empty_all<K: AsRef<str>>(values: &[K], name: &str) -> Result<()> {
    if values.is_empty() {
        return Err(Error::invalid_argument(name, "must contain at least one item"));
    }
    if let Some(index) = values.iter().position(|v| v.as_ref().is_empty()) {
        return Err(Error::invalid_argument(
            name,
            format!("item {} must not be empty", index),
        ));
    }
    Ok(())
}

/// Reject a number below `min`.
pub fn min_value<N: PartialOrd + Display>(value: N, min: N, name: &str) -> Result<()> {
    if value < min {
        return Err(Error::invalid_argument(
            name,
            format!("must be at least {}, got {}", min, value),
        ));
    }
    Ok(())
}
