use axum::http::StatusCode;

use crate::api::rest::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.pact.dev/{}", code))
        .with_code(code)
        .with_instance(instance);

    // Add trace id from current tracing span if available
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "ACCOUNTS_USER_NOT_FOUND",
            "User not found",
            "User not found",
            instance,
        ),
        DomainError::EmailNotRegistered { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "ACCOUNTS_USER_NOT_FOUND",
            "User not found",
            format!("{}", e),
            instance,
        ),
        DomainError::NotInPact { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "ACCOUNTS_NOT_IN_PACT",
            "User not in pact",
            format!("{}", e),
            instance,
        ),
        DomainError::EmailAlreadyExists { .. } => from_parts(
            StatusCode::CONFLICT,
            "ACCOUNTS_EMAIL_CONFLICT",
            "User already exists",
            format!("{}", e),
            instance,
        ),
        DomainError::AlreadyInPact { .. } => from_parts(
            StatusCode::CONFLICT,
            "ACCOUNTS_ALREADY_IN_PACT",
            "User is already in pact",
            format!("{}", e),
            instance,
        ),
        DomainError::SelfReference => from_parts(
            StatusCode::BAD_REQUEST,
            "ACCOUNTS_SELF_REFERENCE",
            "Invalid email",
            format!("{}", e),
            instance,
        ),
        DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "ACCOUNTS_VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::InvalidBearer => from_parts(
            StatusCode::UNAUTHORIZED,
            "ACCOUNTS_UNAUTHORIZED",
            "Not authorized",
            "Missing, invalid or expired bearer token",
            instance,
        ),
        DomainError::Delivery { .. } => {
            tracing::error!(error = ?e, "Email delivery failed");
            from_parts(
                StatusCode::BAD_GATEWAY,
                "ACCOUNTS_EMAIL_DELIVERY",
                "Email not sent",
                "The verification email could not be sent, please try again later",
                instance,
            )
        }
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ACCOUNTS_INTERNAL",
                "Internal error",
                "An internal error occurred",
                instance,
            )
        }
    }
}
