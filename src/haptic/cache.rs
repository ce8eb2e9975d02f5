//! In-memory translation cache
//!
//! Maps derived [`CacheKey`]s to previously generated results. Unbounded by
//! default: entries live until `clear()`. An optional entry limit turns on
//! least-recently-used eviction.
//!
//! Every operation takes the same mutex, so concurrent `get`/`put`/`clear`
//! calls are serialized and the map is never observed half-updated.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, warn};

use super::cache_key::CacheKey;
use crate::types::TranslationResult;

struct CacheEntry {
    result: TranslationResult,
    /// Logical clock value of the last get/put, for LRU eviction
    last_used: u64,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Keys in first-insertion order
    order: VecDeque<CacheKey>,
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheInner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            self.order.retain(|k| k != &key);
            self.evictions += 1;
            debug!(key = %key, "Evicted least recently used cache entry");
        }
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// `None` when unbounded
    pub max_entries: Option<usize>,
}

/// Thread-safe store of translation results
pub struct TranslationCache {
    inner: Mutex<CacheInner>,
    max_entries: Option<usize>,
}

impl TranslationCache {
    /// Create an unbounded cache
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            max_entries: None,
        }
    }

    /// Create a cache holding at most `max_entries` results.
    ///
    /// `0` means unbounded.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            max_entries: (max_entries > 0).then_some(max_entries),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|e| {
            warn!("TranslationCache mutex poisoned, recovering");
            e.into_inner()
        })
    }

    /// Look up a stored result. Returns a copy.
    pub fn get(&self, key: &CacheKey) -> Option<TranslationResult> {
        let mut inner = self.lock();
        let now = inner.tick();
        let found = inner.entries.get_mut(key).map(|entry| {
            entry.last_used = now;
            entry.result.clone()
        });
        if found.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        found
    }

    /// Store a result, replacing any existing entry for the key.
    pub fn put(&self, key: CacheKey, result: TranslationResult) {
        let mut inner = self.lock();
        let now = inner.tick();

        if let Some(entry) = inner.entries.get_mut(&key) {
            entry.result = result;
            entry.last_used = now;
            return;
        }

        if let Some(limit) = self.max_entries {
            while inner.entries.len() >= limit {
                inner.evict_least_recent();
            }
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            CacheEntry {
                result,
                last_used: now,
            },
        );
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        removed
    }

    /// Up to `limit` keys in insertion order, for introspection
    pub fn snapshot_keys(&self, limit: usize) -> Vec<CacheKey> {
        self.lock().order.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            max_entries: self.max_entries,
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}
