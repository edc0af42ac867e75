//! Card Cache - A single-record HTTP service over a per-key locked cache
//!
//! The core is [`cache::LockedCache`], an in-process expiring cache that runs
//! at most one population per key at a time while distinct keys proceed in
//! parallel.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use api::AppState;
pub use cache::{CacheConfig, LockedCache};
pub use config::Config;
pub use error::{ApiError, CacheError};
pub use repository::CardRepository;
