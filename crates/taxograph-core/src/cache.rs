//! Memoizing cache in front of SAP queries.
//!
//! Keyed by unordered label pairs: `(a, b)` and `(b, a)` hit the same slot
//! via lexicographic normalization. The underlying graph is immutable after
//! construction, so entries never go stale and there is no eviction path.
//! Growth is bounded by the number of distinct label pairs ever queried.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::digraph::VertexId;

/// Sentinel length for "no common ancestor exists".
pub const NO_ANCESTOR: i64 = -1;

/// A cached SAP outcome. The no-ancestor sentinel is cached like any other
/// result, so a disconnected pair is only ever computed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CachedSap {
    pub length: i64,
    pub ancestor: Option<VertexId>,
}

/// Hit/miss counters, readable for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Concurrent label-pair cache for SAP results.
///
/// Safe to share between query workers: the map's per-key entry API makes the
/// check-miss / compute / store sequence atomic per key. A duplicated
/// computation under contention would be idempotent anyway.
#[derive(Debug, Default)]
pub struct SapCache {
    entries: DashMap<(String, String), CachedSap>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexicographically normalized key: `(a, b)` and `(b, a)` collapse to
    /// one slot.
    fn key(label_a: &str, label_b: &str) -> (String, String) {
        if label_a <= label_b {
            (label_a.to_string(), label_b.to_string())
        } else {
            (label_b.to_string(), label_a.to_string())
        }
    }

    pub fn get(&self, label_a: &str, label_b: &str) -> Option<CachedSap> {
        let found = self.entries.get(&Self::key(label_a, label_b)).map(|e| *e);
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn insert(&self, label_a: &str, label_b: &str, result: CachedSap) {
        self.entries.insert(Self::key(label_a, label_b), result);
    }

    /// Cached lookup with atomic per-key miss handling: `compute` runs only
    /// when the pair has never been resolved.
    pub fn get_or_insert_with<E>(
        &self,
        label_a: &str,
        label_b: &str,
        compute: impl FnOnce() -> Result<CachedSap, E>,
    ) -> Result<CachedSap, E> {
        let key = Self::key(label_a, label_b);
        if let Some(entry) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(a = label_a, b = label_b, "SAP cache hit");
            return Ok(*entry);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(a = label_a, b = label_b, "SAP cache miss");
        let result = compute()?;
        // entry().or_insert keeps the first writer's value if another worker
        // raced us here; both computed the same thing.
        Ok(*self.entries.entry(key).or_insert(result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
