//! Cache Store Module
//!
//! Abstract key-value storage behind the locked cache, plus the in-memory
//! implementation backed by a concurrent map.

use dashmap::DashMap;

use crate::cache::CacheEntry;

// == Store Trait ==
/// Key-value storage used by [`LockedCache`](crate::cache::LockedCache).
///
/// Implementations must be safe for concurrent access: the cache reads
/// without holding the per-key lock on its fast path. Writes for a key only
/// ever happen while that key's lock is held.
pub trait KeyValueStore<V>: Send + Sync {
    /// Returns a copy of the entry stored under `key`, expired or not.
    fn get(&self, key: &str) -> Option<CacheEntry<V>>;

    /// Stores `entry` under `key`, replacing any previous entry.
    fn insert(&self, key: String, entry: CacheEntry<V>);

    /// Removes and returns the entry under `key`.
    fn remove(&self, key: &str) -> Option<CacheEntry<V>>;

    /// Drops every entry.
    fn clear(&self);

    /// Returns the number of stored entries, including expired ones not yet
    /// evicted.
    fn len(&self) -> usize;

    /// Returns true if the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Memory Store ==
/// In-process store on top of `DashMap`.
#[derive(Debug)]
pub struct MemoryStore<V> {
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V> MemoryStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> KeyValueStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn insert(&self, key: String, entry: CacheEntry<V>) {
        self.entries.insert(key, entry);
    }

    fn remove(&self, key: &str) -> Option<CacheEntry<V>> {
        self.entries.remove(key).map(|(_, entry)| entry)
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
