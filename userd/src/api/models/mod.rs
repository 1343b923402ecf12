//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request deserialization
//! and response serialization. These models define the public API contract.
//!
//! # Design Principles
//!
//! - **Separation of Concerns**: API models are distinct from database models,
//!   allowing independent evolution of API and storage representations
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API docs
//! - **Closed Enums**: Roles are a closed enum, so unknown role strings are
//!   rejected at deserialization time rather than handled ad hoc in handlers
//!
//! # Model Categories
//!
//! - [`users`]: User profiles, roles, and creation/update requests
//! - [`auth`]: Login and registration payloads

pub mod auth;
pub mod users;
