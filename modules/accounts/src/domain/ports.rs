use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Outbound email transport.
///
/// Implementations report transport failures as `DomainError::Delivery`.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError>;
}

/// Issues and checks signed bearer tokens carrying a user id.
pub trait BearerTokens: Send + Sync {
    fn issue(&self, user_id: Uuid) -> Result<String, DomainError>;
    /// Returns the embedded user id, or `DomainError::InvalidBearer`.
    fn verify(&self, token: &str) -> Result<Uuid, DomainError>;
}
