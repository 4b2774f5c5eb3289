//! Background expiry cleanup
//!
//! Expired keys are already invisible to every command, but they keep their
//! memory until touched. [`ExpiryCleaner`] runs a thread that calls
//! [`MemoryStore::purge_expired`] on a fixed interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::MemoryStore;

/// Background expiry cleanup task
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use redkit_storage::{ExpiryCleaner, MemoryStore};
///
/// let store = MemoryStore::shared();
/// let cleaner = ExpiryCleaner::new(store.clone(), Duration::from_millis(50));
/// let handle = cleaner.start();
///
/// cleaner.shutdown();
/// handle.join().unwrap();
/// ```
pub struct ExpiryCleaner {
    store: Arc<MemoryStore>,
    check_interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl ExpiryCleaner {
    /// Create a cleaner for `store` that purges every `check_interval`
    pub fn new(store: Arc<MemoryStore>, check_interval: Duration) -> Self {
        Self {
            store,
            check_interval,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start the cleanup thread. It runs until [`ExpiryCleaner::shutdown`].
    pub fn start(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let shutdown = Arc::clone(&self.shutdown);
        let check_interval = self.check_interval;

        thread::spawn(move || {
            debug!(target: "redkit::store", ?check_interval, "Expiry cleaner started");
            while !shutdown.load(Ordering::Relaxed) {
                // Short naps so shutdown is noticed quickly
                let nap = Duration::from_millis(100).min(check_interval);
                let mut elapsed = Duration::ZERO;
                while elapsed < check_interval {
                    if shutdown.load(Ordering::Relaxed) {
                        return;
                    }
                    thread::sleep(nap);
                    elapsed += nap;
                }
                store.purge_expired();
            }
        })
    }

    /// Signal the thread to stop after its current nap
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// True once shutdown has been signaled
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
