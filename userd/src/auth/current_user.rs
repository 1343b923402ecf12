//! Extractor for the authenticated caller.

use crate::{
    api::models::users::CurrentUser,
    auth::session,
    config::Config,
    errors::{Error, Result},
    AppState,
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::{instrument, trace};

/// Resolve the caller from the `Authorization: Bearer <token>` header.
///
/// A missing header, non-Bearer scheme, or failed token verification all
/// collapse to a generic `Unauthenticated` error; the response never reveals
/// which check failed. Server-side failures (missing signing secret) keep
/// their `Internal` classification.
#[instrument(skip_all)]
pub fn authenticate(headers: &HeaderMap, config: &Config) -> Result<CurrentUser> {
    let auth_header = headers.get(header::AUTHORIZATION).ok_or(Error::Unauthenticated { message: None })?;

    let auth_str = auth_header.to_str().map_err(|e| {
        trace!("Authorization header is not valid UTF-8: {e}");
        Error::Unauthenticated { message: None }
    })?;

    let token = match auth_str.strip_prefix("Bearer ") {
        Some(token) => token,
        None => {
            trace!("Authorization header does not use the Bearer scheme");
            return Err(Error::Unauthenticated { message: None });
        }
    };

    session::verify_session_token(token, config)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        authenticate(&parts.headers, &state.config)
    }
}
