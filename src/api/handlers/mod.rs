//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod cache;
pub mod categories;
pub mod health;

pub use cache::{
    cache_stats_handler, clear_cache_handler, disable_cache_handler, enable_cache_handler,
    reset_cache_stats_handler,
};
pub use categories::{
    create_category_handler, delete_category_handler, get_category_by_name_handler,
    get_category_handler, list_categories_handler, update_category_handler,
};
pub use health::health_handler;
