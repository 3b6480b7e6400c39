//! API route configuration.

use crate::api::handlers::{
    cache_stats_handler, clear_cache_handler, create_category_handler, delete_category_handler,
    disable_cache_handler, enable_cache_handler, get_category_by_name_handler,
    get_category_handler, list_categories_handler, reset_cache_stats_handler,
    update_category_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /categories`                       - List categories (`?parent_id=N` for children)
/// - `POST   /categories`                       - Create a category
/// - `DELETE /categories`                       - Delete by `?id=N` or `?name=S`
/// - `GET    /categories/{id}`                  - Fetch by id (cached)
/// - `PATCH  /categories/{id}`                  - Partially update a category
/// - `GET    /categories/by-name/{name}`        - Fetch by name (cached)
/// - `GET    /cache/categories`                 - Cache statistics
/// - `POST   /cache/categories/enable`          - Enable the cache
/// - `POST   /cache/categories/disable`         - Disable the cache
/// - `POST   /cache/categories/clear`           - Drop all cached entries
/// - `POST   /cache/categories/reset-stats`     - Zero the hit/miss counters
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(list_categories_handler)
                .post(create_category_handler)
                .delete(delete_category_handler),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler).patch(update_category_handler),
        )
        .route(
            "/categories/by-name/{name}",
            get(get_category_by_name_handler),
        )
        .route("/cache/categories", get(cache_stats_handler))
        .route("/cache/categories/enable", post(enable_cache_handler))
        .route("/cache/categories/disable", post(disable_cache_handler))
        .route("/cache/categories/clear", post(clear_cache_handler))
        .route(
            "/cache/categories/reset-stats",
            post(reset_cache_stats_handler),
        )
}
