//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed CRUD operations, and returns domain models from
//! [`crate::db::models`]. The [`Repository`] trait defines the common
//! create/get/list/update surface.

pub mod repository;
pub mod users;

pub use repository::Repository;
pub use users::Users;
