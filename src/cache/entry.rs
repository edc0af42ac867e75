//! Cache Entry Module
//!
//! Defines a stored value together with its absolute expiration.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;

// == Cache Entry ==
/// A single cache entry with value and expiry metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// Absolute expiration; the entry is absent from this instant on
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now` that expires at `expires_at`.
    pub fn new(value: V, now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    /// Creates an entry written at `now` that lives for `ttl`.
    pub fn with_ttl(value: V, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(value, now, expires_after(now, ttl))
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// zero TTL produces an entry that is never observed as live.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, saturating at the maximum representable timestamp.
pub fn expires_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    ChronoDuration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
