//! Cache Module
//!
//! Provides an in-process expiring cache with per-key locked population.

mod clock;
mod entry;
mod locked;
mod locks;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{expires_after, CacheEntry};
pub use locked::{CacheConfig, LockedCache};
pub use locks::{KeyGuard, KeyLocks};
pub use stats::CacheStats;
pub use store::{KeyValueStore, MemoryStore};
