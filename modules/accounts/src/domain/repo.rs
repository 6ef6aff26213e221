use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::Contact;
use crate::domain::model::{UserRecord, VerificationToken};

/// Failure of a constrained write.
///
/// Uniqueness is enforced by the store itself, so inserts report a violated
/// constraint instead of the service checking beforehand.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port for the domain layer: user and pact persistence.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRecord>>;
    /// Load a user by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>>;
    /// Insert a fully-formed user. Fails with `UniqueViolation` on a taken email.
    async fn insert(&self, user: UserRecord) -> Result<(), StoreError>;
    /// Flip the verified flag. Returns false if the user is gone.
    async fn mark_verified(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Pact entries of `owner` in insertion order.
    async fn list_pact(&self, owner: Uuid) -> anyhow::Result<Vec<Contact>>;
    /// Append a snapshot. Fails with `UniqueViolation` if `owner` already holds that email.
    async fn push_contact(&self, owner: Uuid, contact: Contact) -> Result<(), StoreError>;
    /// Remove the entry for `contact_id` in one statement. Returns true if a row was removed.
    async fn pull_contact(&self, owner: Uuid, contact_id: Uuid) -> anyhow::Result<bool>;
}

/// Port for the domain layer: verification token persistence.
#[async_trait]
pub trait VerificationTokensRepository: Send + Sync {
    /// The live token of a user, if any.
    async fn find_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<VerificationToken>>;
    /// Token matching both user and secret exactly.
    async fn find_matching(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> anyhow::Result<Option<VerificationToken>>;
    /// Fails with `UniqueViolation` if the user already has a live token.
    async fn insert(&self, token: VerificationToken) -> Result<(), StoreError>;
    /// Record that the email carrying token `id` was sent. Returns false if the token is gone.
    async fn mark_delivered(&self, id: Uuid) -> anyhow::Result<bool>;
    /// Delete every token of a user. Returns the number of rows deleted.
    async fn delete_for_user(&self, user_id: Uuid) -> anyhow::Result<u64>;
}
