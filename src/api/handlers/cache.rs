//! Handlers for category cache administration.
//!
//! Every endpoint answers with the cache statistics as they are after the
//! action was applied:
//!
//! ```json
//! { "size": 1, "hits": 2, "misses": 1, "hit_rate": 66.66666666666667, "enabled": true }
//! ```

use axum::{Json, extract::State};

use crate::infrastructure::cache::CacheStats;
use crate::state::AppState;

/// `GET /api/cache/categories`
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.category_cache.stats())
}

/// `POST /api/cache/categories/enable`
pub async fn enable_cache_handler(State(state): State<AppState>) -> Json<CacheStats> {
    state.category_cache.enable();
    Json(state.category_cache.stats())
}

/// `POST /api/cache/categories/disable`
///
/// Entries are kept; lookups miss until the cache is enabled again.
pub async fn disable_cache_handler(State(state): State<AppState>) -> Json<CacheStats> {
    state.category_cache.disable();
    Json(state.category_cache.stats())
}

/// `POST /api/cache/categories/clear`
///
/// Drops every entry. Hit and miss counters are kept.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<CacheStats> {
    state.category_cache.clear();
    Json(state.category_cache.stats())
}

/// `POST /api/cache/categories/reset-stats`
pub async fn reset_cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    state.category_cache.reset_stats();
    Json(state.category_cache.stats())
}
