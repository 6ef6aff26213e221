use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::AccountsApi,
    error::AccountsError,
    model::{
        Contact, Credentials, LoginOutcome, NewRegistration, PactAddition, Registration,
        UserProfile, VerifyOutcome,
    },
};
use crate::domain::{auth_service::AuthService, pact_service::PactService};

/// Local implementation of the AccountsApi trait that delegates to the domain services
pub struct AccountsLocalClient {
    auth: Arc<AuthService>,
    pact: Arc<PactService>,
}

impl AccountsLocalClient {
    pub fn new(auth: Arc<AuthService>, pact: Arc<PactService>) -> Self {
        Self { auth, pact }
    }
}

#[async_trait]
impl AccountsApi for AccountsLocalClient {
    async fn register(&self, new_user: NewRegistration) -> Result<Registration, AccountsError> {
        self.auth.register(new_user).await.map_err(Into::into)
    }

    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AccountsError> {
        self.auth.login(credentials).await.map_err(Into::into)
    }

    async fn verify_email(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<VerifyOutcome, AccountsError> {
        self.auth
            .verify_email(user_id, token)
            .await
            .map_err(Into::into)
    }

    async fn authenticate(&self, bearer: &str) -> Result<Uuid, AccountsError> {
        self.auth.authenticate(bearer).map_err(Into::into)
    }

    async fn me(&self, caller: Uuid) -> Result<UserProfile, AccountsError> {
        self.auth.me(caller).await.map_err(Into::into)
    }

    async fn get_pact(&self, caller: Uuid) -> Result<Vec<Contact>, AccountsError> {
        self.pact.get_pact(caller).await.map_err(Into::into)
    }

    async fn add_to_pact(&self, caller: Uuid, email: &str) -> Result<PactAddition, AccountsError> {
        self.pact.add_to_pact(caller, email).await.map_err(Into::into)
    }

    async fn remove_from_pact(&self, caller: Uuid, email: &str) -> Result<(), AccountsError> {
        self.pact
            .remove_from_pact(caller, email)
            .await
            .map_err(Into::into)
    }
}
