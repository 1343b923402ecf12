//! Authentication and authorization system.
//!
//! # Authentication
//!
//! Stateless bearer-token authentication: users log in via `/login` with
//! email and password, receive a signed JWT, and present it on subsequent
//! requests in an `Authorization: Bearer <token>` header. The token encodes
//! the user's ID and role, so protected requests need no session storage or
//! database lookup to establish identity.
//!
//! # Authorization
//!
//! Access control is role-based with an ownership override:
//! - **Roles**: `admin`, `sub_admin`, and `client`, a closed enum
//! - **Ownership**: users can always act on their own record
//! - **Record-level checks**: some decisions depend on the target record's
//!   role (sub-admins cannot touch admin records), so they run after the
//!   target has been fetched
//!
//! See [`permissions`] for the checking functions.
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for the authenticated user in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`permissions`]: Role and record-level access checks
//! - [`session`]: JWT creation and verification
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use userd::api::models::users::CurrentUser;
//! use userd::auth::permissions::RequireAdmin;
//!
//! async fn protected_handler(user: CurrentUser) -> Result<String, Error> {
//!     Ok(format!("Hello, user {}!", user.id))
//! }
//!
//! async fn admin_handler(RequireAdmin(admin): RequireAdmin) -> Result<String, Error> {
//!     Ok(format!("Hello, admin {}!", admin.id))
//! }
//! ```

pub mod current_user;
pub mod password;
pub mod permissions;
pub mod session;
