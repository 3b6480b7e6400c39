//! Handlers for category management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::category::{
    CategoryItem, CategoryListResponse, CreateCategoryRequest, DeleteCategoryQuery,
    ListCategoriesQuery, UpdateCategoryRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists categories.
///
/// # Endpoint
///
/// `GET /api/categories[?parent_id=N]`
///
/// With `parent_id`, only the direct children of that category are listed.
pub async fn list_categories_handler(
    Query(query): Query<ListCategoriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, AppError> {
    let categories = state
        .category_service
        .list_categories(query.parent_id)
        .await?;

    let items: Vec<CategoryItem> = categories.iter().map(CategoryItem::from).collect();

    Ok(Json(CategoryListResponse {
        total: items.len(),
        items,
    }))
}

/// Creates a new category.
///
/// # Endpoint
///
/// `POST /api/categories`
///
/// # Request Body
///
/// ```json
/// { "name": "Groceries", "parent_id": 1, "remark": "Weekly shopping" }
/// ```
///
/// # Errors
///
/// Returns 400 if the name is invalid or the parent does not exist.
/// Returns 409 if the name is already taken.
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryItem>), AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .create_category(payload.parent_id, payload.name, payload.remark)
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryItem::from(category.as_ref()))))
}

/// Fetches a category by id.
///
/// # Endpoint
///
/// `GET /api/categories/{id}`
///
/// # Errors
///
/// Returns 404 if the category does not exist.
pub async fn get_category_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CategoryItem>, AppError> {
    let category = state.category_service.get_by_id(id).await?;

    Ok(Json(CategoryItem::from(category.as_ref())))
}

/// Fetches a category by exact name.
///
/// # Endpoint
///
/// `GET /api/categories/by-name/{name}`
///
/// # Errors
///
/// Returns 404 if no category has this name.
pub async fn get_category_by_name_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CategoryItem>, AppError> {
    let category = state.category_service.get_by_name(&name).await?;

    Ok(Json(CategoryItem::from(category.as_ref())))
}

/// Partially updates a category.
///
/// # Endpoint
///
/// `PATCH /api/categories/{id}`
///
/// All fields are optional. `parent_id: null` moves the category to the top
/// level, `remark: null` clears the remark.
///
/// # Errors
///
/// Returns 400 if the body is empty, the name is invalid, or the new parent is
/// missing or the category itself.
/// Returns 404 if the category does not exist.
/// Returns 409 if the new name is already taken.
pub async fn update_category_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryItem>, AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .update_category(id, payload.into())
        .await?;

    Ok(Json(CategoryItem::from(category.as_ref())))
}

/// Deletes a category selected by id or by name.
///
/// # Endpoint
///
/// `DELETE /api/categories?id=N` or `DELETE /api/categories?name=S`
///
/// Returns the deleted category.
///
/// # Errors
///
/// Returns 400 if both or neither of `id` and `name` are given, or if the
/// category still has child categories.
/// Returns 404 if the category does not exist.
pub async fn delete_category_handler(
    Query(query): Query<DeleteCategoryQuery>,
    State(state): State<AppState>,
) -> Result<Json<CategoryItem>, AppError> {
    let deleted = state
        .category_service
        .delete_category(query.id, query.name.as_deref())
        .await?;

    Ok(Json(CategoryItem::from(&deleted)))
}
