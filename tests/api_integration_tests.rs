//! Integration Tests for API Endpoints
//!
//! Drives the full router against a scratch server root.

use std::path::Path;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cached_file_server::{api::create_router, AppState, CacheStore};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

struct TestServer {
    root: TempDir,
    files: TempDir,
    state: AppState,
}

impl TestServer {
    fn new(capacity: usize) -> Self {
        Self::with_store(CacheStore::new(capacity, 0))
    }

    fn with_store(store: CacheStore) -> Self {
        let root = tempfile::tempdir().unwrap();
        let files = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(root.path().join("a.txt"), "alpha").unwrap();
        std::fs::write(root.path().join("b.txt"), "bravo").unwrap();
        std::fs::write(root.path().join("c.txt"), "charlie").unwrap();
        std::fs::write(root.path().join("blob.bin"), [0u8, 159, 146, 150, 0]).unwrap();
        std::fs::write(files.path().join("404.html"), "<h1>not here</h1>").unwrap();

        let state = AppState::new(
            store,
            root.path().to_path_buf(),
            files.path().to_path_buf(),
        );
        Self { root, files, state }
    }

    fn app(&self) -> Router {
        create_router(self.state.clone())
    }

    fn root(&self) -> &Path {
        self.root.path()
    }
}

async fn send(app: Router, method: &str, uri: &str, body: Body) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    send(app, "GET", uri, Body::empty()).await
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_to_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// == Static Files ==

#[tokio::test]
async fn test_serves_file_with_content_type() {
    let server = TestServer::new(10);

    let response = get(server.app(), "/a.txt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/plain");
    assert_eq!(body_bytes(response).await, b"alpha");
}

#[tokio::test]
async fn test_root_serves_index() {
    let server = TestServer::new(10);

    let response = get(server.app(), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/html");
    assert_eq!(body_bytes(response).await, b"<h1>home</h1>");
}

#[tokio::test]
async fn test_binary_file_round_trips() {
    let server = TestServer::new(10);

    // First response comes from disk, second from the cache
    for _ in 0..2 {
        let response = get(server.app(), "/blob.bin").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/octet-stream");
        assert_eq!(body_bytes(response).await, vec![0u8, 159, 146, 150, 0]);
    }
}

#[tokio::test]
async fn test_repeat_request_is_served_from_cache() {
    let server = TestServer::new(10);

    assert_eq!(get(server.app(), "/a.txt").await.status(), StatusCode::OK);

    // The cache holds no staleness checks: changes on disk are not seen
    std::fs::write(server.root().join("a.txt"), "changed").unwrap();
    let response = get(server.app(), "/a.txt").await;
    assert_eq!(body_bytes(response).await, b"alpha");

    let stats = body_to_json(get(server.app(), "/stats").await).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["total_entries"], 1);
}

#[tokio::test]
async fn test_evicted_file_is_reloaded_from_disk() {
    let server = TestServer::new(2);

    get(server.app(), "/a.txt").await;
    get(server.app(), "/b.txt").await;
    get(server.app(), "/c.txt").await;

    // a.txt was evicted, so the new contents show up
    std::fs::write(server.root().join("a.txt"), "fresh").unwrap();
    let response = get(server.app(), "/a.txt").await;
    assert_eq!(body_bytes(response).await, b"fresh");

    let stats = body_to_json(get(server.app(), "/stats").await).await;
    assert_eq!(stats["evictions"], 2);
    assert_eq!(stats["total_entries"], 2);
    assert_eq!(stats["capacity"], 2);
}

#[tokio::test]
async fn test_file_grown_past_size_limit_is_not_served_stale() {
    let server = TestServer::with_store(CacheStore::with_max_entry_size(10, 0, Some(5)));

    let response = get(server.app(), "/a.txt").await;
    assert_eq!(body_bytes(response).await, b"alpha");

    // An oversized overwrite for the same key drops the cached copy
    server
        .state
        .cache
        .put(&server.root().join("a.txt").to_string_lossy(), "text/plain", b"alpha-grown")
        .await
        .unwrap();

    std::fs::write(server.root().join("a.txt"), "alpha-grown").unwrap();
    let response = get(server.app(), "/a.txt").await;
    assert_eq!(body_bytes(response).await, b"alpha-grown");

    let stats = body_to_json(get(server.app(), "/stats").await).await;
    assert_eq!(stats["bypassed"], 2);
    assert_eq!(stats["total_entries"], 0);
}

#[tokio::test]
async fn test_oversized_file_bypasses_cache() {
    let server = TestServer::with_store(CacheStore::with_max_entry_size(10, 0, Some(5)));

    let response = get(server.app(), "/c.txt").await;
    assert_eq!(body_bytes(response).await, b"charlie");

    let stats = body_to_json(get(server.app(), "/stats").await).await;
    assert_eq!(stats["bypassed"], 1);
    assert_eq!(stats["total_entries"], 0);
}

#[tokio::test]
async fn test_missing_file_serves_404_page() {
    let server = TestServer::new(10);

    let response = get(server.app(), "/missing.html").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["content-type"], "text/html");
    assert_eq!(body_bytes(response).await, b"<h1>not here</h1>");
}

#[tokio::test]
async fn test_parent_traversal_is_forbidden() {
    let server = TestServer::new(10);

    let response = get(server.app(), "/../secret.txt").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Forbidden"));
}

#[tokio::test]
async fn test_put_on_static_path_not_allowed() {
    let server = TestServer::new(10);

    let response = send(server.app(), "PUT", "/a.txt", Body::from("x")).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// == D20 Endpoint ==

#[tokio::test]
async fn test_d20_endpoint() {
    let server = TestServer::new(10);

    let response = get(server.app(), "/d20").await;

    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    let roll: u32 = text.parse().unwrap();
    assert!((1..=20).contains(&roll));
}

// == Save Endpoint ==

#[tokio::test]
async fn test_save_endpoint_success() {
    let server = TestServer::new(10);

    let response = send(server.app(), "POST", "/save", Body::from("some notes")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "ok");

    let saved: Vec<_> = std::fs::read_dir(server.files.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("save_"))
        .collect();
    assert_eq!(saved.len(), 1);
    assert_eq!(std::fs::read_to_string(saved[0].path()).unwrap(), "some notes");
}

#[tokio::test]
async fn test_save_endpoint_empty_body() {
    let server = TestServer::new(10);

    let response = send(server.app(), "POST", "/save", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "ok");
}

// == Health Endpoint ==

#[tokio::test]
async fn test_health_endpoint() {
    let server = TestServer::new(10);

    let response = get(server.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
