mod common;

use cashlens::domain::entities::{NewCategory, UpdateCategory};
use cashlens::domain::repositories::CategoryRepository;
use cashlens::error::AppError;
use cashlens::infrastructure::persistence::PgCategoryRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_category(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let result = repo
        .create(NewCategory {
            parent_id: None,
            name: "Food".to_string(),
            remark: Some("Everything edible".to_string()),
        })
        .await;

    assert!(result.is_ok());
    let category = result.unwrap();
    assert!(category.id > 0);
    assert_eq!(category.name, "Food");
    assert_eq!(category.parent_id, None);
    assert_eq!(category.remark, Some("Everything edible".to_string()));
}

#[sqlx::test]
async fn test_create_duplicate_name_conflicts(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    common::create_test_category(&pool, "Food", None).await;

    let result = repo
        .create(NewCategory {
            parent_id: None,
            name: "Food".to_string(),
            remark: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_create_with_missing_parent_fails(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let result = repo
        .create(NewCategory {
            parent_id: Some(9999),
            name: "Orphan".to_string(),
            remark: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
}

#[sqlx::test]
async fn test_find_by_name_is_exact(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    common::create_test_category(&pool, "Food", None).await;

    let found = repo.find_by_name("Food").await.unwrap();
    assert_eq!(found.unwrap().name, "Food");

    assert!(repo.find_by_name("food").await.unwrap().is_none());
    assert!(repo.find_by_name("Foo").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_id(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    let id = common::create_test_category(&pool, "Transport", None).await;

    let found = repo.find_by_id(id).await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(id));

    assert!(repo.find_by_id(id + 1000).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_find_by_parent_id_and_count_children(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    let food = common::create_test_category(&pool, "Food", None).await;
    common::create_test_category(&pool, "Groceries", Some(food)).await;
    common::create_test_category(&pool, "Restaurants", Some(food)).await;
    common::create_test_category(&pool, "Transport", None).await;

    let children = repo.find_by_parent_id(food).await.unwrap();
    let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Groceries", "Restaurants"]);

    assert_eq!(repo.count_children(food).await.unwrap(), 2);
    assert_eq!(repo.count_children(children[0].id).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_list_categories(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    common::create_test_category(&pool, "Food", None).await;
    common::create_test_category(&pool, "Transport", None).await;

    let all = repo.list().await.unwrap();

    assert_eq!(all.len(), 2);
    assert!(all[0].id < all[1].id);
}

#[sqlx::test]
async fn test_update_partial_fields(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    let food = common::create_test_category(&pool, "Food", None).await;
    let id = common::create_test_category(&pool, "Snacks", None).await;

    let updated = repo
        .update(
            id,
            UpdateCategory {
                name: Some("Sweets".to_string()),
                parent_id: Some(Some(food)),
                remark: Some(Some("Occasional".to_string())),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Sweets");
    assert_eq!(updated.parent_id, Some(food));
    assert_eq!(updated.remark, Some("Occasional".to_string()));
    assert!(updated.updated_at >= updated.created_at);

    // Absent fields stay, explicit nulls clear.
    let cleared = repo
        .update(
            id,
            UpdateCategory {
                name: None,
                parent_id: Some(None),
                remark: Some(None),
            },
        )
        .await
        .unwrap();

    assert_eq!(cleared.name, "Sweets");
    assert_eq!(cleared.parent_id, None);
    assert_eq!(cleared.remark, None);
}

#[sqlx::test]
async fn test_update_missing_category(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool));

    let result = repo
        .update(
            42,
            UpdateCategory {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_delete_category(pool: PgPool) {
    let repo = PgCategoryRepository::new(Arc::new(pool.clone()));
    let id = common::create_test_category(&pool, "Temporary", None).await;

    repo.delete(id).await.unwrap();

    assert!(repo.find_by_id(id).await.unwrap().is_none());
    assert_eq!(common::count_categories(&pool).await, 0);

    let again = repo.delete(id).await;
    assert!(matches!(again, Err(AppError::NotFound { .. })));
}
