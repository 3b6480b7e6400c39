//! Category management service with read-through caching.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{Category, NewCategory, UpdateCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CategoryCache;

/// Maximum length of a category name, in characters.
pub const MAX_NAME_LENGTH: usize = 64;

/// Service for creating, looking up, updating and deleting categories.
///
/// Lookups by name and by id go through the [`CategoryCache`] first and fill
/// it on a miss. Every successful write invalidates the affected entry, so
/// the cache never serves a category that storage no longer has.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    cache: Arc<CategoryCache>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a new category service.
    pub fn new(repository: Arc<R>, cache: Arc<CategoryCache>) -> Self {
        Self { repository, cache }
    }

    /// The cache this service reads through.
    pub fn cache(&self) -> &Arc<CategoryCache> {
        &self.cache
    }

    /// Creates a new category.
    ///
    /// # Validation
    ///
    /// - Name must be non-blank and at most [`MAX_NAME_LENGTH`] characters
    /// - Name must not already be taken
    /// - Parent, when given, must exist
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails.
    /// Returns [`AppError::Conflict`] if the name already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_category(
        &self,
        parent_id: Option<i64>,
        name: String,
        remark: Option<String>,
    ) -> Result<Arc<Category>, AppError> {
        validate_name(&name)?;

        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(
                "Category already exists",
                json!({ "name": name }),
            ));
        }

        if let Some(parent_id) = parent_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        let created = Arc::new(
            self.repository
                .create(NewCategory {
                    parent_id,
                    name,
                    remark,
                })
                .await?,
        );

        info!(id = created.id, name = %created.name, "Category created");
        self.cache.set(Arc::clone(&created));
        Ok(created)
    }

    /// Retrieves a category by exact name, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no category has this name.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_name(&self, name: &str) -> Result<Arc<Category>, AppError> {
        if let Some(cached) = self.cache.get_by_name(name) {
            return Ok(cached);
        }

        let category = self
            .repository
            .find_by_name(name)
            .await?
            .map(Arc::new)
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "name": name })))?;

        debug!(name, "Category loaded from storage");
        self.cache.set(Arc::clone(&category));
        Ok(category)
    }

    /// Retrieves a category by id, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_id(&self, id: i64) -> Result<Arc<Category>, AppError> {
        if let Some(cached) = self.cache.get_by_id(&id.to_string()) {
            return Ok(cached);
        }

        let category = self
            .repository
            .find_by_id(id)
            .await?
            .map(Arc::new)
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?;

        debug!(id, "Category loaded from storage");
        self.cache.set(Arc::clone(&category));
        Ok(category)
    }

    /// Lists categories, bypassing the cache.
    ///
    /// With `parent_id` set, only the direct children of that category are
    /// returned; otherwise every category is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_categories(&self, parent_id: Option<i64>) -> Result<Vec<Category>, AppError> {
        match parent_id {
            Some(parent_id) => self.repository.find_by_parent_id(parent_id).await,
            None => self.repository.list().await,
        }
    }

    /// Applies a partial update to a category.
    ///
    /// The old cache entry is invalidated and the updated category cached in
    /// its place.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Validation`] if the new name is invalid, or the new
    /// parent is missing or the category itself.
    /// Returns [`AppError::Conflict`] if the new name is taken by another category.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_category(
        &self,
        id: i64,
        update: UpdateCategory,
    ) -> Result<Arc<Category>, AppError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?;

        if update.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "fields": ["name", "parent_id", "remark"] }),
            ));
        }

        if let Some(name) = &update.name {
            validate_name(name)?;

            if name != &existing.name
                && let Some(other) = self.repository.find_by_name(name).await?
            {
                return Err(AppError::conflict(
                    "Category already exists",
                    json!({ "name": name, "id": other.id }),
                ));
            }
        }

        if let Some(Some(parent_id)) = update.parent_id {
            if parent_id == id {
                return Err(AppError::bad_request(
                    "Category cannot be its own parent",
                    json!({ "id": id }),
                ));
            }
            self.ensure_parent_exists(parent_id).await?;
        }

        let updated = Arc::new(self.repository.update(id, update).await?);

        self.cache.invalidate(&existing.name);
        self.cache.set(Arc::clone(&updated));

        info!(id, name = %updated.name, "Category updated");
        Ok(updated)
    }

    /// Deletes a category selected by exactly one of `id` or `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if both or neither selectors are given,
    /// or if the category still has child categories.
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_category(
        &self,
        id: Option<i64>,
        name: Option<&str>,
    ) -> Result<Category, AppError> {
        let existing = match (id, name) {
            (Some(id), None) => self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))?,
            (None, Some(name)) => self
                .repository
                .find_by_name(name)
                .await?
                .ok_or_else(|| {
                    AppError::not_found("Category not found", json!({ "name": name }))
                })?,
            _ => {
                return Err(AppError::bad_request(
                    "Exactly one of id or name must be provided",
                    json!({ "id": id, "name": name }),
                ));
            }
        };

        let children = self.repository.count_children(existing.id).await?;
        if children > 0 {
            return Err(AppError::bad_request(
                "Cannot delete a category that has child categories",
                json!({ "id": existing.id, "children_count": children }),
            ));
        }

        self.repository.delete(existing.id).await?;
        self.cache.invalidate(&existing.name);

        info!(id = existing.id, name = %existing.name, "Category deleted");
        Ok(existing)
    }

    async fn ensure_parent_exists(&self, parent_id: i64) -> Result<(), AppError> {
        match self.get_by_id(parent_id).await {
            Ok(_) => Ok(()),
            Err(AppError::NotFound { .. }) => Err(AppError::bad_request(
                "Parent category does not exist",
                json!({ "parent_id": parent_id }),
            )),
            Err(e) => Err(e),
        }
    }
}

/// Validates a category name.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the name is blank or too long.
fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request(
            "Category name must not be empty",
            json!({ "field": "name" }),
        ));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::bad_request(
            "Category name is too long",
            json!({ "field": "name", "max": MAX_NAME_LENGTH }),
        ));
    }

    Ok(())
}
