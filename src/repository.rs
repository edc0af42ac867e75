//! Card Repository
//!
//! Binds the locked cache to the single card record.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{Clock, KeyValueStore, LockedCache, MemoryStore, SystemClock};
use crate::error::Result;
use crate::models::Card;

/// Cache key under which the card lives
pub const CARD_CACHE_KEY: &str = "my_card_1";

/// Reads and writes the card through a shared [`LockedCache`].
pub struct CardRepository<S = MemoryStore<Card>, C = SystemClock> {
    cache: Arc<LockedCache<Card, S, C>>,
    card_ttl: Duration,
}

impl<S, C> CardRepository<S, C>
where
    S: KeyValueStore<Card>,
    C: Clock,
{
    /// Creates a repository; stored cards live for `card_ttl`.
    pub fn new(cache: Arc<LockedCache<Card, S, C>>, card_ttl: Duration) -> Self {
        Self { cache, card_ttl }
    }

    /// Returns the current card, if any.
    pub async fn get(&self) -> Result<Option<Card>> {
        self.cache.get(CARD_CACHE_KEY).await
    }

    /// Returns the current card, storing a default one if none exists.
    pub async fn get_or_init(&self) -> Result<Card> {
        self.cache
            .get_or_create(
                CARD_CACHE_KEY,
                || async {
                    debug!("initializing default card");
                    Ok::<_, Infallible>(Card::default())
                },
                self.card_ttl,
            )
            .await
    }

    /// Stores `card`, replacing any previous one.
    pub async fn set(&self, card: Card) -> Result<()> {
        self.cache
            .set_with_ttl(CARD_CACHE_KEY, card, self.card_ttl)
            .await
    }
}

impl<S, C> Clone for CardRepository<S, C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            card_ttl: self.card_ttl,
        }
    }
}
