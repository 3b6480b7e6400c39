//! In-process read-through cache for category lookups.

use super::stats::{CacheStats, Counters, hit_rate};
use crate::domain::entities::Category;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, trace};

static GLOBAL: OnceLock<Arc<CategoryCache>> = OnceLock::new();

/// Both lookup indices over one set of cached categories.
///
/// Every mutation goes through this type while the write lock is held, so a
/// reader never sees a category in one map but not the other.
#[derive(Debug, Default)]
struct CacheIndex {
    by_name: HashMap<String, Arc<Category>>,
    by_id: HashMap<String, Arc<Category>>,
}

impl CacheIndex {
    fn insert(&mut self, category: Arc<Category>) {
        let id_key = category.id_key();

        // Drop the keys of whatever entity currently owns either slot, so a
        // rename or re-key cannot leave a name-only or id-only orphan behind.
        if let Some(previous) = self.by_name.get(&category.name)
            && previous.id != category.id
        {
            self.by_id.remove(&previous.id_key());
        }
        if let Some(previous) = self.by_id.get(&id_key)
            && previous.name != category.name
        {
            self.by_name.remove(&previous.name);
        }

        self.by_name.insert(category.name.clone(), Arc::clone(&category));
        self.by_id.insert(id_key, category);
    }

    fn remove_by_name(&mut self, name: &str) -> Option<Arc<Category>> {
        let removed = self.by_name.remove(name)?;
        self.by_id.remove(&removed.id_key());
        Some(removed)
    }

    fn clear(&mut self) -> usize {
        let size = self.by_name.len();
        self.by_name.clear();
        self.by_id.clear();
        size
    }
}

/// Read-through cache in front of category lookups by name and by id.
///
/// The cache never talks to storage. Callers follow the miss-fill sequence
/// themselves: look up, on a miss query the repository, then [`set`] the
/// result. Two concurrent misses on the same key may both fill it; the last
/// `set` wins and both carry the same data.
///
/// Mutation paths must call [`invalidate`] or [`clear`] after every write,
/// because the cache cannot observe storage changes on its own.
///
/// While disabled, lookups always miss (and are still counted) and `set`
/// silently drops its argument. Entries cached before the cache was disabled
/// become visible again on [`enable`].
///
/// [`set`]: Self::set
/// [`invalidate`]: Self::invalidate
/// [`clear`]: Self::clear
/// [`enable`]: Self::enable
#[derive(Debug)]
pub struct CategoryCache {
    index: RwLock<CacheIndex>,
    counters: Counters,
    enabled: AtomicBool,
}

impl CategoryCache {
    /// Creates an empty, enabled cache.
    pub fn new() -> Self {
        Self {
            index: RwLock::new(CacheIndex::default()),
            counters: Counters::default(),
            enabled: AtomicBool::new(true),
        }
    }

    /// Returns the process-wide cache, creating it on first use.
    ///
    /// Every call within a process returns the same instance.
    pub fn global() -> Arc<CategoryCache> {
        Arc::clone(GLOBAL.get_or_init(|| {
            debug!("Creating process-wide category cache");
            Arc::new(CategoryCache::new())
        }))
    }

    /// Looks up a category by its exact name.
    ///
    /// Counts exactly one hit or one miss per call, including when disabled.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<Category>> {
        let found = if self.is_enabled() {
            self.read_index().by_name.get(name).cloned()
        } else {
            None
        };
        self.record(found.is_some(), "name", name);
        found
    }

    /// Looks up a category by the text form of its identifier.
    ///
    /// Same counting and gating rules as [`Self::get_by_name`].
    pub fn get_by_id(&self, id: &str) -> Option<Arc<Category>> {
        let found = if self.is_enabled() {
            self.read_index().by_id.get(id).cloned()
        } else {
            None
        };
        self.record(found.is_some(), "id", id);
        found
    }

    /// Caches a category under both its name and its identifier.
    ///
    /// Overwrites existing entries for either key. Does nothing while the
    /// cache is disabled.
    pub fn set(&self, category: Arc<Category>) {
        if !self.is_enabled() {
            trace!(name = %category.name, "Category cache disabled, dropping SET");
            return;
        }

        debug!(id = category.id, name = %category.name, "Category cache SET");
        self.write_index().insert(category);
    }

    /// Removes the category cached under `name`, from both indices.
    ///
    /// Unknown names are ignored.
    pub fn invalidate(&self, name: &str) {
        if let Some(removed) = self.write_index().remove_by_name(name) {
            debug!(id = removed.id, name, "Category cache INVALIDATE");
        }
    }

    /// Removes every entry, whether or not the cache is enabled.
    ///
    /// Hit and miss counters are kept.
    pub fn clear(&self) {
        let dropped = self.write_index().clear();
        info!(dropped, "Category cache cleared");
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
        info!("Category cache enabled");
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        info!("Category cache disabled");
    }

    /// Enables or disables the cache in one call, e.g. from configuration.
    pub fn set_enabled(&self, enabled: bool) {
        if enabled {
            self.enable();
        } else {
            self.disable();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Returns a fresh snapshot of size, counters and hit rate.
    ///
    /// Counters are read without the index lock, so under concurrent access
    /// the snapshot may be slightly out of step with `size`.
    pub fn stats(&self) -> CacheStats {
        let size = self.read_index().by_name.len();
        let hits = self.counters.hits();
        let misses = self.counters.misses();

        CacheStats {
            size,
            hits,
            misses,
            hit_rate: hit_rate(hits, misses),
            enabled: self.is_enabled(),
        }
    }

    /// Zeroes the hit and miss counters. Administrative and test use only.
    pub fn reset_stats(&self) {
        self.counters.reset();
        info!("Category cache statistics reset");
    }

    fn record(&self, hit: bool, index: &'static str, key: &str) {
        if hit {
            self.counters.record_hit();
            trace!(index, key, "Category cache HIT");
        } else {
            self.counters.record_miss();
            trace!(index, key, "Category cache MISS");
        }
    }

    // Every critical section leaves the index consistent, so a poisoned lock
    // still guards valid data.
    fn read_index(&self) -> RwLockReadGuard<'_, CacheIndex> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> RwLockWriteGuard<'_, CacheIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CategoryCache {
    fn default() -> Self {
        Self::new()
    }
}
