//! Locked Cache Module
//!
//! Expiring cache whose population, writes and invalidations are serialized
//! per key. Distinct keys never contend with each other.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::cache::locks::{KeyGuard, KeyLocks};
use crate::cache::stats::StatsRecorder;
use crate::cache::{
    expires_after, CacheEntry, CacheStats, Clock, KeyValueStore, MemoryStore, SystemClock,
};
use crate::error::{BoxError, CacheError, Result};

// == Cache Config ==
/// Tuning knobs for [`LockedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Upper bound on waiting for a per-key lock; `None` waits forever
    pub lock_timeout: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Some(Duration::from_secs(5)),
        }
    }
}

// == Locked Cache ==
/// In-process cache with absolute per-entry expiry and per-key locking.
///
/// Reads on the [`get_or_create`](Self::get_or_create) fast path go straight
/// to the store. Every other operation, and every population, runs while
/// holding the lock for its key, so an entry is only ever observed fully
/// written or not at all.
///
/// After [`close`](Self::close) every operation fails with
/// [`CacheError::UseAfterClose`].
pub struct LockedCache<V, S = MemoryStore<V>, C = SystemClock> {
    store: S,
    locks: KeyLocks,
    clock: C,
    config: CacheConfig,
    stats: StatsRecorder,
    closed: AtomicBool,
    _value: PhantomData<fn() -> V>,
}

impl<V> LockedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache over an in-memory store using the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_parts(MemoryStore::new(), SystemClock, config)
    }
}

impl<V, S, C> LockedCache<V, S, C>
where
    V: Clone + Send + Sync + 'static,
    S: KeyValueStore<V>,
    C: Clock,
{
    /// Creates a cache from an explicit store and clock.
    pub fn with_parts(store: S, clock: C, config: CacheConfig) -> Self {
        Self {
            store,
            locks: KeyLocks::new(),
            clock,
            config,
            stats: StatsRecorder::default(),
            closed: AtomicBool::new(false),
            _value: PhantomData,
        }
    }

    // == Get Or Create ==
    /// Returns the live value for `key`, running `factory` to produce it on a
    /// miss.
    ///
    /// A live entry is returned without taking the lock. Otherwise the key's
    /// lock is acquired and the store re-checked, so callers that queued up
    /// behind a populating caller receive its value instead of running their
    /// own factory. The stored entry expires at `now + ttl`.
    ///
    /// # Errors
    /// - [`CacheError::FactoryFailed`] if `factory` fails; nothing is stored
    ///   and the next call populates again.
    /// - [`CacheError::LockTimeout`] if the lock wait exceeds the bound.
    /// - [`CacheError::UseAfterClose`] once the cache is closed.
    pub async fn get_or_create<F, Fut, E>(&self, key: &str, factory: F, ttl: Duration) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        E: Into<BoxError>,
    {
        self.ensure_open()?;

        if let Some(entry) = self.store.get(key) {
            if !entry.is_expired(self.clock.now()) {
                self.stats.record_hit();
                debug!(key, "cache hit");
                return Ok(entry.value);
            }
        }

        let _guard = self.lock(key).await?;

        if let Some(entry) = self.live_entry_locked(key) {
            self.stats.record_hit();
            debug!(key, "cache hit after lock wait");
            return Ok(entry.value);
        }

        self.stats.record_miss();
        debug!(key, "cache miss, running factory");

        let value = match factory().await {
            Ok(value) => value,
            Err(source) => {
                self.stats.record_factory_failure();
                let err = CacheError::factory_failed(key, source);
                warn!(key, error = %err, "cache population failed");
                return Err(err);
            }
        };

        let entry = CacheEntry::with_ttl(value.clone(), self.clock.now(), ttl);
        let expires_at = entry.expires_at;
        self.commit(key, entry)?;
        debug!(key, %expires_at, "cache populated");
        self.stats.record_population();

        Ok(value)
    }

    // == Get ==
    /// Returns the live value for `key`, or `None` if missing or expired.
    ///
    /// Always takes the key's lock. Never populates.
    pub async fn get(&self, key: &str) -> Result<Option<V>> {
        Ok(self.get_entry(key).await?.map(|entry| entry.value))
    }

    /// Like [`get`](Self::get) but returns the whole entry, expiry included.
    pub async fn get_entry(&self, key: &str) -> Result<Option<CacheEntry<V>>> {
        let _guard = self.lock(key).await?;

        let entry = self.live_entry_locked(key);
        if entry.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        Ok(entry)
    }

    // == Set ==
    /// Replaces the entry for `key` with `value`, expiring at `expires_at`.
    ///
    /// Concurrent writers of one key are serialized; the last one wins.
    pub async fn set(&self, key: &str, value: V, expires_at: DateTime<Utc>) -> Result<()> {
        let _guard = self.lock(key).await?;

        self.store.remove(key);
        self.commit(key, CacheEntry::new(value, self.clock.now(), expires_at))?;
        debug!(key, %expires_at, "cache entry set");

        Ok(())
    }

    /// Replaces the entry for `key`, expiring `ttl` from now.
    pub async fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let expires_at = expires_after(self.clock.now(), ttl);
        self.set(key, value, expires_at).await
    }

    // == Invalidate ==
    /// Removes the entry for `key`. Absent keys are not an error.
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        let _guard = self.lock(key).await?;

        if self.store.remove(key).is_some() {
            debug!(key, "cache entry invalidated");
        }

        Ok(true)
    }

    // == Close ==
    /// Releases stored entries and lock handles.
    ///
    /// Idempotent. No other operation may be used afterwards.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let entries = self.store.len();
        self.store.clear();
        self.locks.clear();
        info!(entries, "cache closed");
    }

    /// Returns true once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.store.len())
    }

    /// Number of per-key lock handles created so far.
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    // == Internals ==
    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            error!("cache operation attempted after close");
            return Err(CacheError::UseAfterClose);
        }
        Ok(())
    }

    async fn lock(&self, key: &str) -> Result<KeyGuard> {
        self.ensure_open()?;

        let guard = match self.locks.acquire(key, self.config.lock_timeout).await {
            Ok(guard) => guard,
            Err(err) => {
                if matches!(err, CacheError::LockTimeout { .. }) {
                    self.stats.record_lock_timeout();
                }
                return Err(err);
            }
        };

        self.ensure_open()?;
        Ok(guard)
    }

    /// Stores `entry` under `key`. Caller holds the key's lock.
    ///
    /// `close` does not take per-key locks, so it can clear the store between
    /// the open check and the insert. The entry is withdrawn if that happened.
    fn commit(&self, key: &str, entry: CacheEntry<V>) -> Result<()> {
        self.ensure_open()?;
        self.store.insert(key.to_string(), entry);

        if self.is_closed() {
            self.store.remove(key);
            error!(key, "cache closed during write, entry discarded");
            return Err(CacheError::UseAfterClose);
        }
        Ok(())
    }

    /// Reads the entry for `key`, evicting it if expired. Caller holds the
    /// key's lock.
    fn live_entry_locked(&self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.store.get(key)?;
        if entry.is_expired(self.clock.now()) {
            self.store.remove(key);
            debug!(key, "evicted expired entry");
            return None;
        }
        Some(entry)
    }
}
