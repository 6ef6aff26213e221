use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountsError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("A user cannot add themselves to their own pact")]
    SelfReference,

    #[error("Verification email could not be delivered")]
    Delivery,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error")]
    Internal,
}

impl AccountsError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for AccountsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(format!("User {} not found", id)),
            EmailNotRegistered { email } => {
                Self::not_found(format!("No user registered with email '{}'", email))
            }
            NotInPact { email } => Self::not_found(format!("User '{}' is not in pact", email)),
            EmailAlreadyExists { email } => {
                Self::conflict(format!("User with email '{}' already exists", email))
            }
            AlreadyInPact { email } => Self::conflict(format!("User '{}' is already in pact", email)),
            SelfReference => Self::SelfReference,
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
            Delivery { .. } => Self::Delivery,
            InvalidBearer => Self::Unauthorized,
            Database { .. } | Internal { .. } => Self::internal(),
        }
    }
}
