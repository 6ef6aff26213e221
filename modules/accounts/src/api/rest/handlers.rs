use std::sync::Arc;

use axum::{
    extract::Path,
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::info;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::api::rest::auth::Caller;
use crate::api::rest::dto::{
    LoginReq, MessageDto, PactAdditionDto, PactDto, PactEmailReq, RegisterReq, RegistrationDto,
    SessionDto, UserDto,
};
use crate::api::rest::error::{from_parts, map_domain_error};
use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::api::rest::routes::ApiDoc;
use crate::contract::model::{LoginOutcome, VerifyOutcome};
use crate::domain::auth_service::AuthService;
use crate::domain::pact_service::PactService;

pub const UNVERIFIED_LOGIN_MESSAGE: &str =
    "An email has been sent to your email. Please verify your email to login.";
pub const EMAIL_VERIFIED_MESSAGE: &str = "Email verified successfully.";
pub const PACT_REMOVED_MESSAGE: &str = "User removed from pact";

/// Register a new account and send the verification email
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = RegistrationDto),
        (status = 400, description = "Missing field", body = Problem),
        (status = 409, description = "Email already registered", body = Problem),
    )
)]
pub async fn register(
    Extension(auth): Extension<Arc<AuthService>>,
    uri: Uri,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<RegistrationDto>), ProblemResponse> {
    match auth.register(req.into()).await {
        Ok(reg) => Ok((StatusCode::CREATED, Json(RegistrationDto::from(reg)))),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "users",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Authenticated", body = SessionDto),
        (status = 401, description = "Invalid credentials", body = Problem),
        (status = 403, description = "Email not verified", body = Problem),
    )
)]
pub async fn login(
    Extension(auth): Extension<Arc<AuthService>>,
    uri: Uri,
    Json(req): Json<LoginReq>,
) -> Result<Json<SessionDto>, ProblemResponse> {
    let outcome = auth
        .login(req.into())
        .await
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match outcome {
        LoginOutcome::Authenticated(session) => Ok(Json(SessionDto::from(session))),
        LoginOutcome::Unverified => Err(from_parts(
            StatusCode::FORBIDDEN,
            "ACCOUNTS_EMAIL_NOT_VERIFIED",
            "Email not verified",
            UNVERIFIED_LOGIN_MESSAGE,
            uri.path(),
        )),
        LoginOutcome::Invalid => Err(from_parts(
            StatusCode::UNAUTHORIZED,
            "ACCOUNTS_INVALID_CREDENTIALS",
            "Invalid credentials",
            "Invalid credentials",
            uri.path(),
        )),
    }
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = Problem),
        (status = 404, description = "User no longer exists", body = Problem),
    )
)]
pub async fn me(
    Extension(auth): Extension<Arc<AuthService>>,
    Caller(caller): Caller,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    auth.me(caller)
        .await
        .map(|user| Json(UserDto::from(user)))
        .map_err(|e| map_domain_error(&e, uri.path()))
}

/// Redeem an emailed verification link
#[utoipa::path(
    get,
    path = "/api/users/{id}/verify/{token}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User id"),
        ("token" = String, Path, description = "Verification secret"),
    ),
    responses(
        (status = 200, description = "Email verified", body = MessageDto),
        (status = 400, description = "Invalid link or already verified", body = Problem),
    )
)]
pub async fn verify_email(
    Extension(auth): Extension<Arc<AuthService>>,
    Path((id, token)): Path<(String, String)>,
    uri: Uri,
) -> Result<Json<MessageDto>, ProblemResponse> {
    // A malformed id is just another link that matches nothing.
    let outcome = match Uuid::parse_str(&id) {
        Ok(user_id) => auth
            .verify_email(user_id, &token)
            .await
            .map_err(|e| map_domain_error(&e, uri.path()))?,
        Err(_) => VerifyOutcome::InvalidLink,
    };

    match outcome {
        VerifyOutcome::Verified => Ok(Json(MessageDto::new(EMAIL_VERIFIED_MESSAGE))),
        VerifyOutcome::AlreadyVerified => Err(from_parts(
            StatusCode::BAD_REQUEST,
            "ACCOUNTS_ALREADY_VERIFIED",
            "Already verified",
            "Email verified already",
            uri.path(),
        )),
        VerifyOutcome::InvalidLink => Err(from_parts(
            StatusCode::BAD_REQUEST,
            "ACCOUNTS_INVALID_LINK",
            "Invalid link",
            "Invalid link",
            uri.path(),
        )),
    }
}

/// List the caller's pact
#[utoipa::path(
    get,
    path = "/api/users/pact",
    tag = "pact",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Contacts in insertion order", body = PactDto),
        (status = 401, description = "Missing or invalid token", body = Problem),
    )
)]
pub async fn get_pact(
    Extension(pact): Extension<Arc<PactService>>,
    Caller(caller): Caller,
    uri: Uri,
) -> Result<Json<PactDto>, ProblemResponse> {
    pact.get_pact(caller)
        .await
        .map(|contacts| Json(PactDto::from(contacts)))
        .map_err(|e| map_domain_error(&e, uri.path()))
}

/// Add a registered user to the caller's pact
#[utoipa::path(
    post,
    path = "/api/users/pact",
    tag = "pact",
    security(("bearer" = [])),
    request_body = PactEmailReq,
    responses(
        (status = 201, description = "Contact added", body = PactAdditionDto),
        (status = 400, description = "Missing email or own email", body = Problem),
        (status = 404, description = "No user with that email", body = Problem),
        (status = 409, description = "Already in pact", body = Problem),
    )
)]
pub async fn add_to_pact(
    Extension(pact): Extension<Arc<PactService>>,
    Caller(caller): Caller,
    uri: Uri,
    Json(req): Json<PactEmailReq>,
) -> Result<(StatusCode, Json<PactAdditionDto>), ProblemResponse> {
    info!(email = %req.email, "Adding contact to pact");

    match pact.add_to_pact(caller, &req.email).await {
        Ok(added) => Ok((StatusCode::CREATED, Json(PactAdditionDto::from(added)))),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}

/// Remove a contact from the caller's pact
#[utoipa::path(
    delete,
    path = "/api/users/pact",
    tag = "pact",
    security(("bearer" = [])),
    request_body = PactEmailReq,
    responses(
        (status = 200, description = "Contact removed", body = MessageDto),
        (status = 400, description = "Missing email", body = Problem),
        (status = 404, description = "Unknown user or not in pact", body = Problem),
    )
)]
pub async fn remove_from_pact(
    Extension(pact): Extension<Arc<PactService>>,
    Caller(caller): Caller,
    uri: Uri,
    Json(req): Json<PactEmailReq>,
) -> Result<Json<MessageDto>, ProblemResponse> {
    info!(email = %req.email, "Removing contact from pact");

    pact.remove_from_pact(caller, &req.email)
        .await
        .map(|()| Json(MessageDto::new(PACT_REMOVED_MESSAGE)))
        .map_err(|e| map_domain_error(&e, uri.path()))
}

/// OpenAPI document for the accounts API
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
