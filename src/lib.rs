//! Cached File Server - A small static file server
//!
//! Serves files from a root directory through a bounded LRU content cache,
//! plus a die-roll endpoint and an upload endpoint.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod files;
pub mod models;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStore, SharedCache};
pub use config::Config;
