//! Shared identifier types.

/// Primary key for user records.
pub type UserId = i64;
