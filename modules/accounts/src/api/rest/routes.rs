use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::rest::{dto, handlers, problem};
use crate::domain::auth_service::AuthService;
use crate::domain::pact_service::PactService;

#[derive(OpenApi)]
#[openapi(
    info(title = "Pact accounts API"),
    paths(
        handlers::register,
        handlers::login,
        handlers::me,
        handlers::verify_email,
        handlers::get_pact,
        handlers::add_to_pact,
        handlers::remove_from_pact,
    ),
    components(schemas(
        dto::RegisterReq,
        dto::LoginReq,
        dto::PactEmailReq,
        dto::UserDto,
        dto::SessionDto,
        dto::RegistrationDto,
        dto::ContactDto,
        dto::PactDto,
        dto::PactAdditionDto,
        dto::MessageDto,
        problem::Problem,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "Registration, login and email verification"),
        (name = "pact", description = "Per-user contact list"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn register_routes(router: Router, auth: Arc<AuthService>, pact: Arc<PactService>) -> Router {
    router
        // POST /api/users - Register
        .route("/api/users", post(handlers::register))
        // POST /api/users/login - Log in
        .route("/api/users/login", post(handlers::login))
        // GET /api/users/me - Current profile
        .route("/api/users/me", get(handlers::me))
        // GET /api/users/{id}/verify/{token} - Redeem verification link
        .route("/api/users/{id}/verify/{token}", get(handlers::verify_email))
        // GET|POST|DELETE /api/users/pact - Contact list
        .route(
            "/api/users/pact",
            get(handlers::get_pact)
                .post(handlers::add_to_pact)
                .delete(handlers::remove_from_pact),
        )
        .route("/openapi.json", get(handlers::openapi))
        .layer(Extension(auth))
        .layer(Extension(pact))
}
