//! API Module
//!
//! HTTP handlers and routing for the card service REST API.
//!
//! # Endpoints
//! - `GET /api/card/ping` - Liveness probe returning `pong`
//! - `GET /api/card` - Fetch the card, creating it on first access
//! - `PUT /api/card` - Update the card
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
