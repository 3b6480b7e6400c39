//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::CategoryService;
use crate::infrastructure::cache::CategoryCache;
use crate::infrastructure::persistence::PgCategoryRepository;

/// State shared by all request handlers.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub category_service: Arc<CategoryService<PgCategoryRepository>>,
    pub category_cache: Arc<CategoryCache>,
}

impl AppState {
    /// Wires the repository and service on top of a pool and a cache.
    pub fn new(db: Arc<PgPool>, category_cache: Arc<CategoryCache>) -> Self {
        let repository = Arc::new(PgCategoryRepository::new(db.clone()));
        let category_service = Arc::new(CategoryService::new(
            repository,
            category_cache.clone(),
        ));

        Self {
            db,
            category_service,
            category_cache,
        }
    }
}
