//! Axum route handlers for the REST API.
//!
//! Handlers extract the authenticated caller via [`crate::api::models::users::CurrentUser`]
//! (or [`crate::auth::permissions::RequireAdmin`] for admin-only routes),
//! run the relevant permission checks, and delegate persistence to the
//! repositories in [`crate::db::handlers`].

pub mod auth;
pub mod users;
