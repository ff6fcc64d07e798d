//! LRU Tracker Module
//!
//! Tracks access recency of cached paths for eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Exact least-recently-used ordering over cached paths.
///
/// Every touch stamps the path with a fresh tick from a monotonic counter.
/// `order` maps tick to path, so its first key is always the oldest path.
/// Ticks are unique, which makes insertion order the tie breaker.
#[derive(Debug)]
pub struct LruTracker {
    /// Oldest tick first
    order: BTreeMap<u64, String>,
    /// Current tick of each tracked path
    ticks: HashMap<String, u64>,
    next_tick: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates an empty tracker with room for `capacity` paths.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: BTreeMap::new(),
            ticks: HashMap::with_capacity(capacity),
            next_tick: 0,
        }
    }

    // == Touch ==
    /// Marks a path as most recently used, tracking it if it was new.
    pub fn touch(&mut self, path: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        match self.ticks.get_mut(path) {
            Some(current) => {
                self.order.remove(&*current);
                *current = tick;
            }
            None => {
                self.ticks.insert(path.to_string(), tick);
            }
        }
        self.order.insert(tick, path.to_string());
    }

    // == Remove ==
    /// Stops tracking a path. Unknown paths are ignored.
    pub fn remove(&mut self, path: &str) {
        if let Some(tick) = self.ticks.remove(path) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used path.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, path) = self.order.pop_first()?;
        self.ticks.remove(&path);
        Some(path)
    }

    /// Drops every tracked path.
    pub fn clear(&mut self) {
        self.order.clear();
        self.ticks.clear();
    }
}
