//! Business logic services for the application layer.

pub mod category_service;

pub use category_service::CategoryService;
