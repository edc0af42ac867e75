//! Per-key lock table
//!
//! Maps each key to its own async mutex so that writers of one key never
//! contend with writers of another.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::warn;

use crate::error::{CacheError, Result};

/// Guard held for the duration of a per-key critical section.
pub type KeyGuard = OwnedMutexGuard<()>;

// == Key Locks ==
/// Append-only table of per-key mutexes.
///
/// Handles are created on first use and kept until [`KeyLocks::clear`].
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock handle for `key`, inserting one if absent.
    ///
    /// Insertion goes through the map's entry API so two tasks racing on a
    /// new key always end up sharing one handle.
    pub fn handle(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(key) {
            return Arc::clone(existing.value());
        }

        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Acquires the lock for `key`, waiting at most `timeout` if one is given.
    pub async fn acquire(&self, key: &str, timeout: Option<Duration>) -> Result<KeyGuard> {
        let handle = self.handle(key);

        match timeout {
            None => Ok(handle.lock_owned().await),
            Some(limit) => match tokio::time::timeout(limit, handle.lock_owned()).await {
                Ok(guard) => Ok(guard),
                Err(_) => {
                    warn!(key, timeout_ms = limit.as_millis() as u64, "lock wait timed out");
                    Err(CacheError::LockTimeout {
                        key: key.to_string(),
                        timeout: limit,
                    })
                }
            },
        }
    }

    /// Number of keys that have a lock handle.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns true if no handle has been created yet.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Drops every handle. Guards already held stay valid.
    pub fn clear(&self) {
        self.locks.clear();
    }
}
