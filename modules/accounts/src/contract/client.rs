use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::AccountsError,
    model::{
        Contact, Credentials, LoginOutcome, NewRegistration, PactAddition, Registration,
        UserProfile, VerifyOutcome,
    },
};

/// Public API trait for the accounts module that other modules can use
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Register a new, unverified user and send the verification email
    async fn register(&self, new_user: NewRegistration) -> Result<Registration, AccountsError>;

    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AccountsError>;

    /// Redeem a verification link
    async fn verify_email(&self, user_id: Uuid, token: &str)
        -> Result<VerifyOutcome, AccountsError>;

    /// Resolve the user id carried by a bearer token
    async fn authenticate(&self, bearer: &str) -> Result<Uuid, AccountsError>;

    /// Get the caller's public profile
    async fn me(&self, caller: Uuid) -> Result<UserProfile, AccountsError>;

    /// List the caller's pact
    async fn get_pact(&self, caller: Uuid) -> Result<Vec<Contact>, AccountsError>;

    /// Add the user registered under `email` to the caller's pact
    async fn add_to_pact(&self, caller: Uuid, email: &str) -> Result<PactAddition, AccountsError>;

    /// Remove the user registered under `email` from the caller's pact
    async fn remove_from_pact(&self, caller: Uuid, email: &str) -> Result<(), AccountsError>;
}
