//! Card domain model
//!
//! The single mutable record served by the API.

use serde::{Deserialize, Serialize};

/// Identifier given to the card created on first access.
pub const DEFAULT_CARD_ID: u64 = 1;

/// A user card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub email: String,
    pub password: String,
    pub title: String,
}

impl Card {
    /// Creates an empty card with the given id.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            email: String::new(),
            password: String::new(),
            title: String::new(),
        }
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_ID)
    }
}
