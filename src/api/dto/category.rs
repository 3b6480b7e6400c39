//! DTOs for category endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{Category, UpdateCategory};

/// Request body for `POST /api/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    /// Parent category id; omitted for a top-level category.
    pub parent_id: Option<i64>,

    #[validate(length(max = 255))]
    pub remark: Option<String>,
}

/// Request body for `PATCH /api/categories/{id}`.
///
/// All fields are optional; only provided fields are changed.
///
/// # `parent_id` / `remark` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear (a `null` parent makes the category top-level)
/// - **Value** → set
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub parent_id: Option<Option<i64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub remark: Option<Option<String>>,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(req: UpdateCategoryRequest) -> Self {
        UpdateCategory {
            name: req.name,
            parent_id: req.parent_id,
            remark: req.remark,
        }
    }
}

/// Query parameters for `GET /api/categories`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Query parameters for `DELETE /api/categories`.
///
/// Exactly one of `id` and `name` must be set; the service rejects anything else.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,
}

/// Individual category information.
#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryItem {
    fn from(c: &Category) -> Self {
        CategoryItem {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name.clone(),
            remark: c.remark.clone(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response containing a list of categories.
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub total: usize,
    pub items: Vec<CategoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::category_service::MAX_NAME_LENGTH;

    #[test]
    fn test_update_request_absent_vs_null() {
        let absent: UpdateCategoryRequest = serde_json::from_str(r#"{"name": "Food"}"#).unwrap();
        assert_eq!(absent.parent_id, None);
        assert_eq!(absent.remark, None);

        let cleared: UpdateCategoryRequest =
            serde_json::from_str(r#"{"parent_id": null, "remark": null}"#).unwrap();
        assert_eq!(cleared.parent_id, Some(None));
        assert_eq!(cleared.remark, Some(None));

        let set: UpdateCategoryRequest = serde_json::from_str(r#"{"parent_id": 4}"#).unwrap();
        assert_eq!(set.parent_id, Some(Some(4)));
    }

    #[test]
    fn test_create_request_validation() {
        let ok = CreateCategoryRequest {
            name: "Food".to_string(),
            parent_id: None,
            remark: None,
        };
        assert!(ok.validate().is_ok());

        let empty = CreateCategoryRequest {
            name: String::new(),
            parent_id: None,
            remark: None,
        };
        assert!(empty.validate().is_err());

        let long = CreateCategoryRequest {
            name: "x".repeat(MAX_NAME_LENGTH + 1),
            parent_id: None,
            remark: None,
        };
        assert!(long.validate().is_err());
    }
}
