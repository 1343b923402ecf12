//! OpenAPI documentation configuration.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Security scheme for bearer-token protected routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearer_token".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token authentication. Obtain a token from `/login` and include it \
                            in the `Authorization` header:\n\n```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::users::list_users,
        api::handlers::users::get_user,
        api::handlers::users::update_user,
    ),
    components(schemas(
        crate::api::models::users::Role,
        crate::api::models::users::UserCreate,
        crate::api::models::users::UserUpdate,
        crate::api::models::users::UserResponse,
        crate::api::models::auth::LoginRequest,
        crate::api::models::auth::LoginResponse,
        crate::api::models::auth::RegisterResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "authentication", description = "Account registration and login"),
        (name = "users", description = "User management endpoints"),
    ),
    info(
        title = "userd API",
        description = "User management service with role-based access control",
    )
)]
pub struct ApiDoc;
