//! Hit/miss accounting for the category cache.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of cache state returned by [`super::CategoryCache::stats`].
///
/// Serializes with the fixed keys `size`, `hits`, `misses`, `hit_rate` and
/// `enabled`, so it can be returned as-is from an admin endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of entries in the name index.
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    /// Percentage of lookups served from the cache, in `[0, 100]`.
    pub hit_rate: f64,
    pub enabled: bool,
}

/// Lock-free lookup counters.
///
/// Counters are advisory, so relaxed ordering is enough: a snapshot may lag a
/// concurrent lookup but an increment is never lost.
#[derive(Debug, Default)]
pub(super) struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Counters {
    pub(super) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("category_cache_hits_total").increment(1);
    }

    pub(super) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("category_cache_misses_total").increment(1);
    }

    pub(super) fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub(super) fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub(super) fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Computes `hits / (hits + misses) * 100`, or 0 when nothing was looked up.
pub(super) fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * 100.0
}
