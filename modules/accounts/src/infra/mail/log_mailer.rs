use async_trait::async_trait;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::ports::Mailer;

/// Development transport: writes each message to the log instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        info!(to, subject, body, "Outgoing email (log transport)");
        Ok(())
    }
}
