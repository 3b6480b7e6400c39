//! Category entity representing a named grouping of cash flows.

use chrono::{DateTime, Utc};

/// A category used to group cash-flow records.
///
/// Categories form a tree: `parent_id` points at another category, or is
/// `None` for a top-level category. Names are unique across all categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new Category instance.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let groceries = Category::new(
    ///     7,
    ///     Some(1),
    ///     "Groceries".to_string(),
    ///     None,
    ///     Utc::now(),
    ///     Utc::now(),
    /// );
    /// ```
    pub fn new(
        id: i64,
        parent_id: Option<i64>,
        name: String,
        remark: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            parent_id,
            name,
            remark,
            created_at,
            updated_at,
        }
    }

    /// Canonical text form of the identifier, used as the cache's id key.
    pub fn id_key(&self) -> String {
        self.id.to_string()
    }

    /// Returns true if the category sits at the top of the tree.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Input data for creating a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub parent_id: Option<i64>,
    pub name: String,
    pub remark: Option<String>,
}

/// Partial update for an existing category.
///
/// `None` fields are left unchanged.
/// `parent_id: Some(None)` detaches the category from its parent;
/// `remark: Some(None)` clears the remark.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub parent_id: Option<Option<i64>>,
    pub remark: Option<Option<String>>,
}

impl UpdateCategory {
    /// Returns true if the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none() && self.remark.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation_root() {
        let now = Utc::now();
        let category = Category::new(1, None, "Food".to_string(), None, now, now);

        assert_eq!(category.id, 1);
        assert_eq!(category.name, "Food");
        assert!(category.is_root());
        assert!(category.remark.is_none());
    }

    #[test]
    fn test_category_creation_nested() {
        let now = Utc::now();
        let category = Category::new(
            2,
            Some(1),
            "Groceries".to_string(),
            Some("Weekly shopping".to_string()),
            now,
            now,
        );

        assert!(!category.is_root());
        assert_eq!(category.parent_id, Some(1));
        assert_eq!(category.remark.as_deref(), Some("Weekly shopping"));
    }

    #[test]
    fn test_id_key_is_decimal_text() {
        let now = Utc::now();
        let category = Category::new(4021, None, "Rent".to_string(), None, now, now);

        assert_eq!(category.id_key(), "4021");
    }

    #[test]
    fn test_update_category_default_is_empty() {
        let update = UpdateCategory::default();

        assert!(update.is_empty());
    }

    #[test]
    fn test_update_category_detach_parent() {
        let update = UpdateCategory {
            parent_id: Some(None),
            ..Default::default()
        };

        assert!(!update.is_empty());
        assert_eq!(update.parent_id, Some(None));
    }
}
