//! Cache Store Module
//!
//! Bounded path → entry map with exact LRU eviction.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::error::Result;
#[cfg(test)]
use crate::error::ServerError;

// == Cache Store ==
/// Read-through content cache keyed by resolved request path.
///
/// Holds at most `capacity` entries. Paths are compared byte for byte; the
/// caller is responsible for normalizing them.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, Arc<CacheEntry>>,
    lru: LruTracker,
    stats: CacheStats,
    capacity: usize,
    /// Payloads larger than this are never stored
    max_entry_size: Option<usize>,
    /// Copies larger than this fail as if allocation had failed
    #[cfg(test)]
    copy_limit: Option<usize>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; 0 disables caching entirely
    /// * `reserved_hint` - Pre-allocation hint, no behavioral effect
    pub fn new(capacity: usize, reserved_hint: usize) -> Self {
        Self::with_max_entry_size(capacity, reserved_hint, None)
    }

    /// Creates an empty store that refuses payloads above `max_entry_size` bytes.
    pub fn with_max_entry_size(
        capacity: usize,
        reserved_hint: usize,
        max_entry_size: Option<usize>,
    ) -> Self {
        let reserved = reserved_hint.min(capacity);
        Self {
            entries: HashMap::with_capacity(reserved),
            lru: LruTracker::with_capacity(reserved),
            stats: CacheStats::new(capacity),
            capacity,
            max_entry_size,
            #[cfg(test)]
            copy_limit: None,
        }
    }

    /// Makes every copy above `limit` bytes fail with `OutOfMemory`.
    #[cfg(test)]
    pub(crate) fn with_copy_limit(mut self, limit: usize) -> Self {
        self.copy_limit = Some(limit);
        self
    }

    // == Get ==
    /// Looks up `path`, marking it most recently used on a hit.
    ///
    /// A miss leaves the recency order of every other path untouched.
    pub fn get(&mut self, path: &str) -> Option<Arc<CacheEntry>> {
        match self.entries.get(path) {
            Some(entry) => {
                let entry = Arc::clone(entry);
                self.lru.touch(path);
                self.stats.record_hit();
                debug!(path, "cache hit");
                Some(entry)
            }
            None => {
                self.stats.record_miss();
                debug!(path, "cache miss");
                None
            }
        }
    }

    // == Put ==
    /// Stores a copy of `content` under `path`, replacing any previous entry.
    ///
    /// If `path` is new and the store is full, the least recently used entry
    /// is evicted first. With a capacity of 0 nothing is stored and nothing
    /// is evicted. A payload above the size threshold is not stored either,
    /// and any older entry for `path` is dropped so it cannot be served
    /// in place of the new content.
    ///
    /// # Errors
    /// Returns `ServerError::OutOfMemory` if the copy cannot be allocated. The
    /// store is left exactly as it was.
    pub fn put(&mut self, path: &str, content_type: &str, content: &[u8]) -> Result<()> {
        if self.capacity == 0 {
            return Ok(());
        }

        if let Some(limit) = self.max_entry_size {
            if content.len() > limit {
                if self.entries.remove(path).is_some() {
                    self.lru.remove(path);
                    self.stats.set_total_entries(self.entries.len());
                }
                self.stats.record_bypass();
                debug!(path, size = content.len(), limit, "payload too large to cache");
                return Ok(());
            }
        }

        // Copy before touching any state so a failed allocation changes nothing
        let entry = Arc::new(self.copy_entry(path, content_type, content)?);

        if !self.entries.contains_key(path) && self.entries.len() >= self.capacity {
            self.evict_one();
        }

        self.entries.insert(path.to_string(), entry);
        self.lru.touch(path);
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    fn copy_entry(&self, path: &str, content_type: &str, content: &[u8]) -> Result<CacheEntry> {
        #[cfg(test)]
        if let Some(limit) = self.copy_limit {
            if content.len() > limit {
                return Err(ServerError::OutOfMemory(content.len()));
            }
        }
        CacheEntry::copy_from(path, content_type, content)
    }

    // == Evict ==
    fn evict_one(&mut self) {
        if let Some(victim) = self.lru.evict_oldest() {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(path = %victim, "evicted least recently used entry");
        }
    }

    // == Destroy ==
    /// Releases every entry and consumes the store.
    pub fn destroy(mut self) {
        let released = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        debug!(released, "cache store destroyed");
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks for `path` without counting a lookup or refreshing recency.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }
}
