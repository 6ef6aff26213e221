use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};
use url::Url;

use crate::api::rest::routes;
use crate::config::{AccountsConfig, MailConfig};
use crate::contract::client::AccountsApi;
use crate::domain::auth_service::{AuthService, AuthServiceConfig};
use crate::domain::pact_service::PactService;
use crate::domain::ports::Mailer;
use crate::gateways::local::AccountsLocalClient;
use crate::infra::bearer::JwtBearerTokens;
use crate::infra::mail::{HttpMailer, LogMailer};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{SeaOrmUsersRepository, SeaOrmVerificationTokensRepository};

/// Wired accounts module: services, REST routes and the in-process client.
#[derive(Clone)]
pub struct Accounts {
    auth: Arc<AuthService>,
    pact: Arc<PactService>,
}

impl Accounts {
    /// Build the module on top of an open database connection.
    pub fn init(db: DatabaseConnection, cfg: &AccountsConfig) -> anyhow::Result<Self> {
        info!("Initializing accounts module");
        debug!(
            verification_base_url = %cfg.verification_base_url,
            "Loaded accounts config"
        );

        cfg.validate()?;
        let verification_base_url = cfg.verification_base_url()?;

        let users = Arc::new(SeaOrmUsersRepository::new(db.clone()));
        let tokens = Arc::new(SeaOrmVerificationTokensRepository::new(db));
        let mailer = build_mailer(&cfg.mail)?;
        let bearer = Arc::new(JwtBearerTokens::new(cfg.jwt_secret.as_bytes()));

        let auth = AuthService::new(
            users.clone(),
            tokens,
            mailer,
            bearer,
            AuthServiceConfig {
                verification_base_url,
            },
        );
        let pact = PactService::new(users);

        Ok(Self::from_services(Arc::new(auth), Arc::new(pact)))
    }

    /// Assemble the module from already built services.
    pub fn from_services(auth: Arc<AuthService>, pact: Arc<PactService>) -> Self {
        Self { auth, pact }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running accounts database migrations");
        Migrator::up(db, None)
            .await
            .context("accounts migrations failed")?;
        info!("Accounts database migrations completed successfully");
        Ok(())
    }

    /// Mount the accounts REST routes onto `router`.
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering accounts REST routes");
        routes::register_routes(router, self.auth.clone(), self.pact.clone())
    }

    /// In-process client for other server components.
    pub fn client(&self) -> Arc<dyn AccountsApi> {
        Arc::new(AccountsLocalClient::new(self.auth.clone(), self.pact.clone()))
    }
}

fn build_mailer(cfg: &MailConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    match cfg {
        MailConfig::Log => {
            info!("Verification emails will be written to the log");
            Ok(Arc::new(LogMailer::default()))
        }
        MailConfig::Http {
            endpoint,
            api_key,
            from,
            timeout_sec,
        } => {
            let endpoint = Url::parse(endpoint).context("invalid modules.accounts.mail.endpoint")?;
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(*timeout_sec))
                .build()
                .context("failed to build mail HTTP client")?;
            info!(endpoint = %endpoint, "Verification emails will be sent over HTTP");
            Ok(Arc::new(HttpMailer::new(
                client,
                endpoint,
                api_key.clone(),
                from.clone(),
            )))
        }
    }
}
