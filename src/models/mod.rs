//! Domain model and request/response DTOs for the card API
//!
//! This module defines the card record and the DTOs (Data Transfer Objects)
//! used for serializing/deserializing HTTP request and response bodies.

pub mod card;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use card::{Card, DEFAULT_CARD_ID};
pub use requests::UpdateCardRequest;
pub use responses::{HealthResponse, ResultResponse, StatsResponse};
