//! PostgreSQL implementation of the category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Category, NewCategory, UpdateCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

const CATEGORY_COLUMNS: &str = "id, parent_id, name, remark, created_at, updated_at";

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    parent_id: Option<i64>,
    name: String,
    remark: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category::new(
            r.id,
            r.parent_id,
            r.name,
            r.remark,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for categories.
///
/// Name uniqueness and parent references are also enforced by the schema
/// (`UNIQUE (name)`, `REFERENCES categories (id)`); violations surface as
/// [`AppError::Conflict`] and [`AppError::Validation`] respectively.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        let sql = format!(
            "INSERT INTO categories (parent_id, name, remark) \
             VALUES ($1, $2, $3) \
             RETURNING {CATEGORY_COLUMNS}"
        );

        let row: CategoryRow = sqlx::query_as(&sql)
            .bind(new_category.parent_id)
            .bind(new_category.name)
            .bind(new_category.remark)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");

        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1");

        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Category::from))
    }

    async fn find_by_parent_id(&self, parent_id: i64) -> Result<Vec<Category>, AppError> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY name"
        );

        let rows: Vec<CategoryRow> = sqlx::query_as(&sql)
            .bind(parent_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name");

        let rows: Vec<CategoryRow> = sqlx::query_as(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn update(&self, id: i64, update: UpdateCategory) -> Result<Category, AppError> {
        let update_parent = update.parent_id.is_some();
        let new_parent = update.parent_id.flatten();
        let update_remark = update.remark.is_some();
        let new_remark = update.remark.flatten();

        let sql = format!(
            "UPDATE categories SET \
                 name       = COALESCE($2::TEXT, name), \
                 parent_id  = CASE WHEN $3 THEN $4::BIGINT ELSE parent_id END, \
                 remark     = CASE WHEN $5 THEN $6::TEXT ELSE remark END, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );

        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(update.name)
            .bind(update_parent)
            .bind(new_parent)
            .bind(update_remark)
            .bind(new_remark)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Category::from)
            .ok_or_else(|| AppError::not_found("Category not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    async fn count_children(&self, parent_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
