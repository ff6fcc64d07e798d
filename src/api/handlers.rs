//! API Handlers
//!
//! HTTP request handlers for the file server endpoints.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use rand::Rng;
use tracing::warn;

use crate::cache::{CacheStore, SharedCache};
use crate::config::Config;
use crate::error::ServerError;
use crate::files::{content_type_for, load, resolve, save_body};
use crate::models::{HealthResponse, SaveResponse, StatsResponse};

/// Page served with every 404, looked up in the files directory
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Content cache shared by every request
    pub cache: SharedCache,
    /// Directory static files are served from
    pub server_root: Arc<Path>,
    /// Directory holding the 404 page and uploads
    pub server_files: Arc<Path>,
}

impl AppState {
    /// Creates a new AppState around an explicitly constructed cache.
    pub fn new(cache: CacheStore, server_root: PathBuf, server_files: PathBuf) -> Self {
        Self {
            cache: SharedCache::new(cache),
            server_root: Arc::from(server_root),
            server_files: Arc::from(server_files),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::with_max_entry_size(
            config.cache_capacity,
            config.cache_reserved_hint,
            config.cache_max_entry_bytes,
        );
        Self::new(cache, config.server_root.clone(), config.server_files.clone())
    }
}

/// Handler for GET /d20
///
/// Rolls a twenty-sided die and returns the result as plain text.
pub async fn d20_handler() -> impl IntoResponse {
    let roll: u8 = rand::thread_rng().gen_range(1..=20);
    ([(header::CONTENT_TYPE, "text/plain")], roll.to_string())
}

/// Handler for POST /save
///
/// Stores the raw request body in the files directory. An empty body is
/// still a well-formed request and produces an empty file; malformed
/// requests never get this far because hyper rejects them.
pub async fn save_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<SaveResponse>) {
    match save_body(&state.server_files, &body).await {
        Ok(_) => (StatusCode::OK, Json(SaveResponse::ok())),
        Err(e) => {
            warn!(error = %e, "failed to save upload");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(SaveResponse::error()))
        }
    }
}

/// Fallback handler: serves files below the server root.
///
/// The cache is consulted first. On a miss the file is read with no cache
/// lock held, inserted, then served from the loaded buffer.
pub async fn static_file_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return ServerError::MethodNotAllowed(method.to_string()).into_response();
    }

    let path = match resolve(&state.server_root, uri.path()) {
        Ok(path) => path,
        Err(e) => return e.into_response(),
    };
    let key = path.to_string_lossy();

    if let Some(entry) = state.cache.get(&key).await {
        return file_response(StatusCode::OK, entry.content_type(), entry.bytes());
    }

    let Some(data) = load(&path).await else {
        return not_found_response(&state.server_files).await;
    };
    let content_type = content_type_for(&path);

    // Serve the loaded data even if it could not be cached
    if let Err(e) = state.cache.put(&key, &content_type, &data).await {
        warn!(path = %key, error = %e, "serving file uncached");
    }

    file_response(StatusCode::OK, &content_type, Bytes::from(data))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn file_response(status: StatusCode, content_type: &str, body: Bytes) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, content_type.to_string())],
        body,
    )
        .into_response()
}

/// Builds the 404 response from the files directory's error page, falling
/// back to plain text if the page itself is missing.
async fn not_found_response(server_files: &Path) -> Response {
    let page = server_files.join(NOT_FOUND_PAGE);

    match load(&page).await {
        Some(data) => file_response(
            StatusCode::NOT_FOUND,
            &content_type_for(&page),
            Bytes::from(data),
        ),
        None => {
            warn!(path = %page.display(), "404 page missing, using plain text");
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain")],
                "404 Not Found",
            )
                .into_response()
        }
    }
}
