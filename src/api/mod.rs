//! API Module
//!
//! HTTP handlers and routing for the file server.
//!
//! # Endpoints
//! - `GET /d20` - Roll a twenty-sided die
//! - `POST /save` - Store the request body
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint
//! - `GET /*` - Static files through the content cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
