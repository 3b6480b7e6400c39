//! In-process caching for category lookups.
//!
//! - [`CategoryCache`] - Read-through cache keyed by name and by id
//! - [`CacheStats`] - Size, hit/miss counters and hit rate snapshot

mod category_cache;
mod stats;

pub use category_cache::CategoryCache;
pub use stats::CacheStats;
