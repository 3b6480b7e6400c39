//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgCategoryRepository`] - Category storage and retrieval

pub mod pg_category_repository;

pub use pg_category_repository::PgCategoryRepository;
