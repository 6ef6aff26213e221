use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::contract::model::{
    Credentials, LoginOutcome, NewRegistration, Registration, Session, UserProfile, VerifyOutcome,
};
use crate::domain::credentials::{hash_password, new_verification_secret, verify_password};
use crate::domain::error::DomainError;
use crate::domain::model::{UserRecord, VerificationToken};
use crate::domain::ports::{BearerTokens, Mailer};
use crate::domain::repo::{StoreError, UsersRepository, VerificationTokensRepository};

pub const VERIFICATION_SUBJECT: &str = "Verify Email";
pub const REGISTERED_MESSAGE: &str = "An email has been sent to your email. Please verify email.";

/// Configuration for the auth service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Verification links are `<base>users/<id>/verify/<token>`.
    pub verification_base_url: Url,
}

/// Registration, login and email verification.
/// Depends only on ports, not on infra types.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepository>,
    tokens: Arc<dyn VerificationTokensRepository>,
    mailer: Arc<dyn Mailer>,
    bearer: Arc<dyn BearerTokens>,
    config: AuthServiceConfig,
}

impl AuthService {
    /// Create a service with dependencies.
    pub fn new(
        users: Arc<dyn UsersRepository>,
        tokens: Arc<dyn VerificationTokensRepository>,
        mailer: Arc<dyn Mailer>,
        bearer: Arc<dyn BearerTokens>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            bearer,
            config,
        }
    }

    #[instrument(
        name = "accounts.auth.register",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn register(&self, new_user: NewRegistration) -> Result<Registration, DomainError> {
        info!("Registering new user");

        require("name", &new_user.name)?;
        require("email", &new_user.email)?;
        require("password", &new_user.password)?;

        let password_hash = hash_password(new_user.password).await?;
        let user = UserRecord {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash,
            verified: false,
            created_at: Utc::now(),
        };

        self.users.insert(user.clone()).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => DomainError::email_already_exists(&user.email),
            StoreError::Other(e) => DomainError::database(e.to_string()),
        })?;

        let token = match self.issue_token(&user).await? {
            Some(token) => token,
            None => return Err(DomainError::internal("fresh user already holds a token")),
        };

        // A failed send keeps the account and the undelivered token; the next
        // unverified login delivers it again.
        let verification_email_sent = match self.deliver(&user, &token).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "Verification email not sent on registration");
                false
            }
        };

        let session = self.open_session(&user)?;
        info!(user_id = %user.id, "Successfully registered user");
        Ok(Registration {
            session,
            message: REGISTERED_MESSAGE.to_string(),
            verification_email_sent,
        })
    }

    #[instrument(
        name = "accounts.auth.login",
        skip(self, credentials),
        fields(email = %credentials.email)
    )]
    pub async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, DomainError> {
        debug!("Login attempt");

        let Some(user) = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        else {
            return Ok(LoginOutcome::Invalid);
        };

        if user.verified {
            if verify_password(credentials.password, user.password_hash.clone()).await? {
                info!(user_id = %user.id, "User authenticated");
                return Ok(LoginOutcome::Authenticated(self.open_session(&user)?));
            }
            return Ok(LoginOutcome::Invalid);
        }

        // A delivered live token means the earlier email stands.
        let live = self
            .tokens
            .find_for_user(user.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        let pending = match live {
            Some(token) if token.delivered => None,
            Some(token) => Some(token),
            None => self.issue_token(&user).await?,
        };
        if let Some(token) = pending {
            self.deliver(&user, &token).await?;
        }

        info!(user_id = %user.id, "Login refused for unverified user");
        Ok(LoginOutcome::Unverified)
    }

    #[instrument(name = "accounts.auth.verify_email", skip(self, token), fields(user_id = %user_id))]
    pub async fn verify_email(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<VerifyOutcome, DomainError> {
        let Some(user) = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        else {
            return Ok(VerifyOutcome::InvalidLink);
        };

        if user.verified {
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        let matching = self
            .tokens
            .find_matching(user.id, token)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if matching.is_none() {
            return Ok(VerifyOutcome::InvalidLink);
        }

        if !self
            .users
            .mark_verified(user.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Ok(VerifyOutcome::InvalidLink);
        }

        // Removes the redeemed token together with anything else left for this user.
        let purged = self
            .tokens
            .delete_for_user(user.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!(purged, "Email verified");
        Ok(VerifyOutcome::Verified)
    }

    /// Resolve the user id carried by a bearer token.
    pub fn authenticate(&self, bearer: &str) -> Result<Uuid, DomainError> {
        self.bearer.verify(bearer)
    }

    #[instrument(name = "accounts.auth.me", skip(self), fields(user_id = %caller))]
    pub async fn me(&self, caller: Uuid) -> Result<UserProfile, DomainError> {
        let user = self
            .users
            .find_by_id(caller)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(caller))?;
        Ok(user.profile())
    }

    /// Build the link mailed to the user.
    pub fn verification_link(&self, user_id: Uuid, token: &str) -> Result<Url, DomainError> {
        let mut url = self.config.verification_base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::internal("verification base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(&["users", &user_id.to_string(), "verify", token]);
        Ok(url)
    }

    // --- helpers ---

    /// Insert a fresh token for `user`.
    /// Returns `None` when a concurrently created token won the unique index.
    async fn issue_token(
        &self,
        user: &UserRecord,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let token = VerificationToken {
            id: Uuid::new_v4(),
            user_id: user.id,
            token: new_verification_secret(),
            delivered: false,
            created_at: Utc::now(),
        };

        match self.tokens.insert(token.clone()).await {
            Ok(()) => Ok(Some(token)),
            Err(StoreError::UniqueViolation(_)) => {
                debug!("Live verification token already exists");
                Ok(None)
            }
            Err(StoreError::Other(e)) => Err(DomainError::database(e.to_string())),
        }
    }

    /// Mail the verification link and flag the token as delivered.
    async fn deliver(&self, user: &UserRecord, token: &VerificationToken) -> Result<(), DomainError> {
        let link = self.verification_link(user.id, &token.token)?;
        self.mailer
            .send(&user.email, VERIFICATION_SUBJECT, link.as_str())
            .await?;
        self.tokens
            .mark_delivered(token.id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(())
    }

    fn open_session(&self, user: &UserRecord) -> Result<Session, DomainError> {
        Ok(Session {
            token: self.bearer.issue(user.id)?,
            user: user.profile(),
            verified: user.verified,
        })
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}
