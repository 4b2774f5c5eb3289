//! Seams to the store transport.
//!
//! The facade never manages connection state. It asks a
//! [`ConnectionProvider`] for a [`Connection`] once per operation and sends
//! each primitive [`Command`] through it.

use std::sync::Arc;

use crate::command::Command;
use crate::error::Result;
use crate::output::Output;
use crate::types::CommandFlags;

/// A handle that executes primitive store commands.
///
/// Implementations must execute each command atomically. Multi-command
/// sequences issued by the facade carry no transactional guarantee.
///
/// Thread safety: handles are shared across threads (requires Send + Sync).
pub trait Connection: Send + Sync {
    /// Execute one command with the given routing hint.
    ///
    /// # Errors
    ///
    /// Returns the store's own failure (wrong type, rejected command,
    /// lost connectivity) unchanged.
    fn execute(&self, command: Command, flags: CommandFlags) -> Result<Output>;
}

/// Supplies live, already-configured connections.
///
/// Owns connection lifecycle, pooling, and failover.
pub trait ConnectionProvider: Send + Sync {
    /// Hand out a command-executing handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`](crate::Error::Connection) when no
    /// connection is available.
    fn connection(&self) -> Result<Arc<dyn Connection>>;
}

/// A shared connection is its own provider.
impl<C> ConnectionProvider for Arc<C>
where
    C: Connection + 'static,
{
    fn connection(&self) -> Result<Arc<dyn Connection>> {
        Ok(self.clone() as Arc<dyn Connection>)
    }
}
