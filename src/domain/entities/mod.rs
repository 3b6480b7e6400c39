//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Category`] - A named, optionally nested grouping of cash flows
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - [`NewCategory`] - For creating new records
//! - [`UpdateCategory`] - For partial updates

pub mod category;

pub use category::{Category, NewCategory, UpdateCategory};
