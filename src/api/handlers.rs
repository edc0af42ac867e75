//! API Handlers
//!
//! HTTP request handlers for each card service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::LockedCache;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Card, HealthResponse, ResultResponse, StatsResponse, UpdateCardRequest,
};
use crate::repository::CardRepository;

/// Application state shared across all handlers.
///
/// Holds the explicitly constructed cache and the repository built on it.
#[derive(Clone)]
pub struct AppState {
    /// Shared locked cache
    pub cache: Arc<LockedCache<Card>>,
    /// Card access through the cache
    pub cards: CardRepository,
}

impl AppState {
    /// Creates a new AppState over the given cache.
    pub fn new(cache: LockedCache<Card>, card_ttl: std::time::Duration) -> Self {
        let cache = Arc::new(cache);
        Self {
            cards: CardRepository::new(Arc::clone(&cache), card_ttl),
            cache,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(LockedCache::new(config.cache_config()), config.card_ttl())
    }
}

/// Handler for GET /api/card/ping
pub async fn ping_handler() -> Json<ResultResponse> {
    Json(ResultResponse::ok("pong"))
}

/// Handler for GET /api/card
///
/// Returns the card, creating the default one on first access.
pub async fn get_card_handler(State(state): State<AppState>) -> ApiResult<Json<Card>> {
    let card = state.cards.get_or_init().await?;
    Ok(Json(card))
}

/// Handler for PUT /api/card
///
/// Overwrites the editable fields of the existing card.
pub async fn update_card_handler(
    State(state): State<AppState>,
    Json(req): Json<UpdateCardRequest>,
) -> ApiResult<Json<ResultResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut card = state
        .cards
        .get()
        .await?
        .ok_or_else(|| ApiError::NotFound("card".to_string()))?;

    req.apply_to(&mut card);
    let id = card.id;
    state.cards.set(card).await?;
    info!(card_id = id, "card updated");

    Ok(Json(ResultResponse::ok("updated")))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
