#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use url::Url;
use uuid::Uuid;

use accounts::contract::model::{Contact, NewRegistration};
use accounts::domain::auth_service::{AuthService, AuthServiceConfig};
use accounts::domain::error::DomainError;
use accounts::domain::model::{UserRecord, VerificationToken};
use accounts::domain::pact_service::PactService;
use accounts::domain::ports::{BearerTokens, Mailer};
use accounts::domain::repo::{StoreError, UsersRepository, VerificationTokensRepository};
use accounts::infra::bearer::JwtBearerTokens;
use accounts::infra::storage::{SeaOrmUsersRepository, SeaOrmVerificationTokensRepository};
use accounts::Accounts;

pub const BASE_URL: &str = "http://localhost:3000/";

// In-memory users store with the same uniqueness rules as the schema
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<UserRecord>>,
    pacts: Mutex<HashMap<Uuid, Vec<Contact>>>,
}

impl InMemoryUsers {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<UserRecord> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRecord>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users.email".into()));
        }
        users.push(user);
        Ok(())
    }

    async fn mark_verified(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_pact(&self, owner: Uuid) -> anyhow::Result<Vec<Contact>> {
        Ok(self
            .pacts
            .lock()
            .unwrap()
            .get(&owner)
            .cloned()
            .unwrap_or_default())
    }

    async fn push_contact(&self, owner: Uuid, contact: Contact) -> Result<(), StoreError> {
        let mut pacts = self.pacts.lock().unwrap();
        let entries = pacts.entry(owner).or_default();
        if entries.iter().any(|c| c.email == contact.email) {
            return Err(StoreError::UniqueViolation("pact_entries.contact_email".into()));
        }
        entries.push(contact);
        Ok(())
    }

    async fn pull_contact(&self, owner: Uuid, contact_id: Uuid) -> anyhow::Result<bool> {
        let mut pacts = self.pacts.lock().unwrap();
        let Some(entries) = pacts.get_mut(&owner) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|c| c.id != contact_id);
        Ok(entries.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryTokens {
    tokens: Mutex<Vec<VerificationToken>>,
}

impl InMemoryTokens {
    pub fn for_user(&self, user_id: Uuid) -> Vec<VerificationToken> {
        self.tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl VerificationTokensRepository for InMemoryTokens {
    async fn find_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<VerificationToken>> {
        Ok(self.for_user(user_id).into_iter().next())
    }

    async fn find_matching(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> anyhow::Result<Option<VerificationToken>> {
        Ok(self
            .for_user(user_id)
            .into_iter()
            .find(|t| t.token == token))
    }

    async fn insert(&self, token: VerificationToken) -> Result<(), StoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.iter().any(|t| t.user_id == token.user_id) {
            return Err(StoreError::UniqueViolation("verification_tokens.user_id".into()));
        }
        tokens.push(token);
        Ok(())
    }

    async fn mark_delivered(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.delivered = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_for_user(&self, user_id: Uuid) -> anyhow::Result<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

// Mailer that records every message and can be switched to fail
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentMail {
        self.sent().last().cloned().expect("no email sent")
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::delivery("transport unavailable"));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Extract `(user_id, token)` from a mailed verification link.
pub fn parse_link(body: &str) -> (Uuid, String) {
    let url = Url::parse(body.trim()).expect("mail body is a URL");
    let segments: Vec<&str> = url.path_segments().expect("hierarchical URL").collect();
    match segments.as_slice() {
        ["users", id, "verify", token] => (Uuid::parse_str(id).unwrap(), token.to_string()),
        other => panic!("unexpected link path {other:?}"),
    }
}

pub fn bearer() -> Arc<JwtBearerTokens> {
    Arc::new(JwtBearerTokens::new(b"test-secret"))
}

pub fn registration(name: &str, email: &str, password: &str) -> NewRegistration {
    NewRegistration {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Services over in-memory stores
pub struct Harness {
    pub users: Arc<InMemoryUsers>,
    pub tokens: Arc<InMemoryTokens>,
    pub mailer: Arc<RecordingMailer>,
    pub bearer: Arc<JwtBearerTokens>,
    pub auth: Arc<AuthService>,
    pub pact: Arc<PactService>,
}

pub fn harness() -> Harness {
    let users = Arc::new(InMemoryUsers::default());
    let tokens = Arc::new(InMemoryTokens::default());
    let mailer = Arc::new(RecordingMailer::default());
    let bearer = bearer();

    let auth = AuthService::new(
        users.clone(),
        tokens.clone(),
        mailer.clone(),
        bearer.clone(),
        AuthServiceConfig {
            verification_base_url: Url::parse(BASE_URL).unwrap(),
        },
    );
    let pact = PactService::new(users.clone());

    Harness {
        users,
        tokens,
        mailer,
        bearer,
        auth: Arc::new(auth),
        pact: Arc::new(pact),
    }
}

impl Harness {
    /// Register and verify a user, returning their id.
    pub async fn verified_user(&self, name: &str, email: &str, password: &str) -> Uuid {
        let reg = self
            .auth
            .register(registration(name, email, password))
            .await
            .unwrap();
        let (id, token) = parse_link(&self.mailer.last().body);
        assert_eq!(id, reg.session.user.id);
        self.auth.verify_email(id, &token).await.unwrap();
        id
    }

    pub fn bearer_for(&self, id: Uuid) -> String {
        self.bearer.issue(id).unwrap()
    }
}

pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Accounts::migrate(&db).await.expect("Failed to run migrations");
    db
}

/// Module wired over in-memory SQLite with a recording mailer
pub async fn sqlite_accounts() -> (Accounts, Arc<RecordingMailer>, DatabaseConnection) {
    let db = create_test_db().await;
    let users = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let tokens = Arc::new(SeaOrmVerificationTokensRepository::new(db.clone()));
    let mailer = Arc::new(RecordingMailer::default());

    let auth = AuthService::new(
        users.clone(),
        tokens,
        mailer.clone(),
        bearer(),
        AuthServiceConfig {
            verification_base_url: Url::parse(BASE_URL).unwrap(),
        },
    );
    let pact = PactService::new(users);

    (
        Accounts::from_services(Arc::new(auth), Arc::new(pact)),
        mailer,
        db,
    )
}
