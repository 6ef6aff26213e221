use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{Contact, UserProfile};

/// Stored user with credential material. Never leaves the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn as_contact(&self) -> Contact {
        Contact {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Single-use email verification secret bound to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    /// Set once the verification email carrying this token went out.
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}
