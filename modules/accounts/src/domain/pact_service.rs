use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{Contact, PactAddition};
use crate::domain::error::DomainError;
use crate::domain::model::UserRecord;
use crate::domain::repo::{StoreError, UsersRepository};

/// Maintains each user's pact on behalf of an already authenticated caller.
#[derive(Clone)]
pub struct PactService {
    users: Arc<dyn UsersRepository>,
}

impl PactService {
    pub fn new(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }

    #[instrument(name = "accounts.pact.get", skip(self), fields(user_id = %caller))]
    pub async fn get_pact(&self, caller: Uuid) -> Result<Vec<Contact>, DomainError> {
        let caller = self.load_caller(caller).await?;
        let pact = self
            .users
            .list_pact(caller.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!("Loaded pact with {} entries", pact.len());
        Ok(pact)
    }

    #[instrument(name = "accounts.pact.add", skip(self), fields(user_id = %caller, target = %email))]
    pub async fn add_to_pact(&self, caller: Uuid, email: &str) -> Result<PactAddition, DomainError> {
        require_email(email)?;

        let caller = self.load_caller(caller).await?;
        let target = self.load_target(email).await?;

        if target.id == caller.id {
            return Err(DomainError::SelfReference);
        }

        self.users
            .push_contact(caller.id, target.as_contact())
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => DomainError::already_in_pact(&target.email),
                StoreError::Other(e) => DomainError::database(e.to_string()),
            })?;

        let pact = self
            .users
            .list_pact(caller.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(contact_id = %target.id, "Added user to pact");
        Ok(PactAddition {
            user_added_id: target.id,
            pact,
        })
    }

    #[instrument(name = "accounts.pact.remove", skip(self), fields(user_id = %caller, target = %email))]
    pub async fn remove_from_pact(&self, caller: Uuid, email: &str) -> Result<(), DomainError> {
        let caller = self.load_caller(caller).await?;
        let target = self.load_target(email).await?;

        let removed = self
            .users
            .pull_contact(caller.id, target.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !removed {
            return Err(DomainError::not_in_pact(email));
        }

        info!(contact_id = %target.id, "Removed user from pact");
        Ok(())
    }

    async fn load_caller(&self, id: Uuid) -> Result<UserRecord, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn load_target(&self, email: &str) -> Result<UserRecord, DomainError> {
        self.users
            .find_by_email(email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::email_not_registered(email))
    }
}

fn require_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::validation("email", "Please enter email"));
    }
    Ok(())
}
