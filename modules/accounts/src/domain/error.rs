use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("No user registered with email '{email}'")]
    EmailNotRegistered { email: String },

    #[error("User '{email}' is not in pact")]
    NotInPact { email: String },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("User '{email}' is already in pact")]
    AlreadyInPact { email: String },

    #[error("A user cannot add themselves to their own pact")]
    SelfReference,

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Email delivery failed: {message}")]
    Delivery { message: String },

    #[error("Invalid or expired bearer token")]
    InvalidBearer,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_not_registered(email: impl Into<String>) -> Self {
        Self::EmailNotRegistered {
            email: email.into(),
        }
    }

    pub fn not_in_pact(email: impl Into<String>) -> Self {
        Self::NotInPact {
            email: email.into(),
        }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn already_in_pact(email: impl Into<String>) -> Self {
        Self::AlreadyInPact {
            email: email.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_fields() {
        let id = Uuid::new_v4();
        assert!(matches!(
            DomainError::user_not_found(id),
            DomainError::UserNotFound { id: got } if got == id
        ));

        match DomainError::validation("email", "must not be empty") {
            DomainError::Validation { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "must not be empty");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }

        assert_eq!(
            DomainError::already_in_pact("b@x.com").to_string(),
            "User 'b@x.com' is already in pact"
        );
    }
}
