//! Shared Cache Handle
//!
//! Cloneable handle that lets concurrent request handlers use one store.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::error::Result;

// == Shared Cache ==
/// A `CacheStore` behind an async read/write lock.
///
/// `get` needs the write lock because a hit moves the path in the recency
/// order. Each call holds the guard only for the in-memory operation, so
/// callers must load files between `get` and `put`, never while locked.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Looks up `path`, refreshing its recency on a hit.
    pub async fn get(&self, path: &str) -> Option<Arc<CacheEntry>> {
        self.inner.write().await.get(path)
    }

    /// Stores a copy of `content` under `path`. Runs under a single guard.
    pub async fn put(&self, path: &str, content_type: &str, content: &[u8]) -> Result<()> {
        self.inner.write().await.put(path, content_type, content)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
