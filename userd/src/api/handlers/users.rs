//! Handlers for listing, fetching, and updating user accounts.

use crate::{
    AppState,
    api::models::users::{CurrentUser, ListUsersQuery, UserResponse, UserUpdate},
    auth::permissions::{self, RequireAdmin},
    db::{
        handlers::{Repository, Users, users::UserFilter},
        models::users::UserUpdateDBRequest,
    },
    errors::Error,
    types::UserId,
};
use axum::{
    extract::{Path, Query, State},
    response::Json,
};

// GET /auth/users - List users visible to the caller
#[utoipa::path(
    get,
    path = "/auth/users",
    tag = "users",
    summary = "List users",
    description = "List users, scoped to the roles visible to the caller's own role",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "List of users", body = [UserResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("bearer_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
    current_user: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, Error> {
    let skip = query.skip.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(100).clamp(1, 1000);

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    let filter = UserFilter::new(current_user.role.visible_roles().to_vec(), skip, limit);
    let users = repo.list(&filter).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// GET /auth/users/{user_id} - Get a specific user
#[utoipa::path(
    get,
    path = "/auth/users/{user_id}",
    tag = "users",
    summary = "Get user",
    description = "Get a specific user by ID, subject to record-level access checks",
    params(
        ("user_id" = i64, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User information", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("bearer_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    current_user: CurrentUser,
) -> Result<Json<UserResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    let user = repo.get_by_id(user_id).await?.ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: user_id.to_string(),
    })?;

    // The decision depends on the target's role, so the fetch comes first
    permissions::check_record_access(&current_user, user.id, user.role)?;

    Ok(Json(UserResponse::from(user)))
}

// PUT /auth/users/{user_id} - Update a user (admin only)
#[utoipa::path(
    put,
    path = "/auth/users/{user_id}",
    tag = "users",
    summary = "Update user",
    description = "Partially update a user record (admin only). Absent fields are left unchanged.",
    params(
        ("user_id" = i64, Path, description = "User ID"),
    ),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error"),
    ),
    security(
        ("bearer_token" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<UserUpdate>,
) -> Result<Json<UserResponse>, Error> {
    let password_hash = match request.password {
        Some(password) => Some(super::auth::hash_password_checked(password, &state).await?),
        None => None,
    };

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut pool_conn);

    let updated = repo
        .update(
            user_id,
            &UserUpdateDBRequest {
                name: request.name,
                email: request.email,
                phone: request.phone,
                password_hash,
                role: request.role,
            },
        )
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::NotFound {
                resource: "User".to_string(),
                id: user_id.to_string(),
            },
            other => Error::Database(other),
        })?;

    Ok(Json(UserResponse::from(updated)))
}
