//! Response models for the file server API
//!
//! DTOs serialized into the JSON bodies of the non-file endpoints.

pub mod responses;

// Re-export commonly used types
pub use responses::{HealthResponse, SaveResponse, StatsResponse};
