//! Role-based access control checks.
//!
//! Handlers call these helpers after authentication has produced a
//! [`CurrentUser`]. Role membership checks operate purely on the caller's
//! identity; record-level checks additionally consider the target record's
//! owner and role. Denials carry the caller's role for logging but the
//! response body never echoes it.

use crate::{
    api::models::users::{CurrentUser, Role},
    errors::{Error, Result},
    types::UserId,
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Require the caller to hold one of the allowed roles.
pub fn require_any_role(user: &CurrentUser, allowed: &[Role], resource: &str) -> Result<()> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(Error::AccessDenied {
            role: user.role,
            resource: resource.to_string(),
        })
    }
}

/// Record-level access check for a fetched user record.
///
/// The target must already have been loaded, since the decision depends on
/// the target's role:
/// - admins may access any record
/// - sub-admins may access anything except admin records
/// - clients may access client records and their own record
pub fn check_record_access(user: &CurrentUser, target_id: UserId, target_role: Role) -> Result<()> {
    let allowed = match user.role {
        Role::Admin => true,
        Role::SubAdmin => target_role != Role::Admin,
        Role::Client => target_role == Role::Client || user.id == target_id,
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::AccessDenied {
            role: user.role,
            resource: format!("user {target_id}"),
        })
    }
}

/// Extractor that authenticates the caller and requires the admin role.
///
/// ```ignore
/// async fn update_user(RequireAdmin(admin): RequireAdmin, ...) -> Result<...>
/// ```
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        require_any_role(&user, &[Role::Admin], "users")?;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId, role: Role) -> CurrentUser {
        CurrentUser { id, role }
    }

    #[test]
    fn test_require_any_role() {
        let admin = user(1, Role::Admin);
        let client = user(2, Role::Client);

        assert!(require_any_role(&admin, &[Role::Admin], "users").is_ok());
        assert!(require_any_role(&client, &[Role::Admin], "users").is_err());
        assert!(require_any_role(&client, &[Role::Admin, Role::Client], "users").is_ok());

        let error = require_any_role(&client, &[Role::Admin], "users").unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_ownership_overrides_role_check() {
        let client = user(5, Role::Client);

        // Role alone would deny admin/sub-admin targets, but the caller owns
        // the target record
        assert!(check_record_access(&client, 5, Role::Client).is_ok());
        assert!(check_record_access(&client, 6, Role::Admin).is_err());
    }

    #[test]
    fn test_admin_accesses_any_record() {
        let admin = user(1, Role::Admin);
        assert!(check_record_access(&admin, 2, Role::Admin).is_ok());
        assert!(check_record_access(&admin, 3, Role::SubAdmin).is_ok());
        assert!(check_record_access(&admin, 4, Role::Client).is_ok());
    }

    #[test]
    fn test_sub_admin_denied_on_admin_records() {
        let sub_admin = user(10, Role::SubAdmin);

        // Role membership alone would allow, but the target is an admin
        assert!(check_record_access(&sub_admin, 1, Role::Admin).is_err());
        assert!(check_record_access(&sub_admin, 11, Role::SubAdmin).is_ok());
        assert!(check_record_access(&sub_admin, 12, Role::Client).is_ok());
    }

    #[test]
    fn test_client_record_access() {
        let client = user(20, Role::Client);

        assert!(check_record_access(&client, 21, Role::Client).is_ok());
        assert!(check_record_access(&client, 20, Role::Client).is_ok());
        assert!(check_record_access(&client, 1, Role::Admin).is_err());
        assert!(check_record_access(&client, 10, Role::SubAdmin).is_err());
    }
}
