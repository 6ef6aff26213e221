use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::error::DomainError;
use crate::domain::ports::Mailer;

/// JSON payload accepted by Resend-compatible `/emails` endpoints.
#[derive(Debug, Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Mail adapter posting plain-text messages to an HTTP email API.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(client: reqwest::Client, endpoint: Url, api_key: String, from: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    #[instrument(
        name = "accounts.http.mail.send",
        skip_all,
        fields(endpoint = %self.endpoint, subject = %subject)
    )]
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        let payload = OutgoingEmail {
            from: &self.from,
            to: [to],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::delivery(format!("POST {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::delivery(format!("HTTP {}", status)));
        }

        debug!("Email accepted by transport");
        Ok(())
    }
}
