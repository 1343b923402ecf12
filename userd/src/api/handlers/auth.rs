//! Handlers for account registration and login.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        auth::{LoginRequest, LoginResponse, RegisterResponse},
        users::{CurrentUser, UserCreate, UserResponse},
    },
    auth::{password, session},
    db::{
        handlers::{Repository, Users},
        models::users::UserCreateDBRequest,
    },
    errors::Error,
};

/// A well-formed Argon2id hash that matches no credential. Login verifies
/// against this when the email is unknown, so the response takes the same
/// time whether or not the account exists.
const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Validate a candidate password against the configured length rules, then
/// hash it on a blocking thread to avoid stalling the async runtime.
pub(crate) async fn hash_password_checked(password: String, state: &AppState) -> Result<String, Error> {
    let password_config = &state.config.auth.password;
    if password.len() < password_config.min_length {
        return Err(Error::BadRequest {
            message: format!("Password must be at least {} characters", password_config.min_length),
        });
    }
    if password.len() > password_config.max_length {
        return Err(Error::BadRequest {
            message: format!("Password must be no more than {} characters", password_config.max_length),
        });
    }

    let params = password_config.argon2_params();
    tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, Some(params)))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })?
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register",
    request_body = UserCreate,
    tag = "authentication",
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "User already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<UserCreate>,
) -> Result<(StatusCode, Json<RegisterResponse>), Error> {
    if request.name.is_empty() || request.email.is_empty() || request.phone.is_empty() || request.password.is_empty() {
        return Err(Error::BadRequest {
            message: "Name, email, phone and password are required".to_string(),
        });
    }

    let password_hash = hash_password_checked(request.password.clone(), &state).await?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    // Duplicate emails surface as a unique violation (409) from the insert
    let created_user = user_repo
        .create(&UserCreateDBRequest {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash,
            role: request.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(created_user),
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "authentication",
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let mut user_repo = Users::new(&mut pool_conn);

    // Find user by email
    let user = user_repo.get_user_by_email(&request.email).await?;

    // Verify password on a blocking thread to avoid blocking async runtime.
    // Unknown emails burn a verification against a fixed hash so timing does
    // not distinguish them from a wrong password.
    let password = request.password.clone();
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let is_valid = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => password::verify_string(&password, &hash),
        None => {
            password::verify_string(&password, UNKNOWN_USER_HASH);
            false
        }
    })
    .await
    .map_err(|e| Error::Internal {
        operation: format!("spawn password verification task: {e}"),
    })?;

    let user = user.filter(|_| is_valid).ok_or_else(|| Error::Unauthenticated {
        message: Some("Invalid email or password".to_string()),
    })?;

    // Create session token
    let current_user = CurrentUser::from(user);
    let token = session::create_session_token(&current_user, &state.config)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
