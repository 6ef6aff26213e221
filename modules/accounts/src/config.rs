use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the accounts module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountsConfig {
    /// Symmetric secret used to sign bearer tokens.
    #[serde(default)]
    pub jwt_secret: String,
    /// Prefix of emailed verification links, e.g. `https://app.example.com/`.
    #[serde(default = "default_verification_base_url")]
    pub verification_base_url: String,
    #[serde(default)]
    pub mail: MailConfig,
}

/// Outbound email transport selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum MailConfig {
    /// Write messages to the log only.
    #[default]
    Log,
    /// POST messages to a Resend-compatible HTTP API.
    Http {
        endpoint: String,
        api_key: String,
        from: String,
        #[serde(default = "default_mail_timeout_sec")]
        timeout_sec: u64,
    },
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            verification_base_url: default_verification_base_url(),
            mail: MailConfig::default(),
        }
    }
}

impl AccountsConfig {
    /// Reject settings the module cannot start with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.is_empty() {
            bail!("modules.accounts.jwt_secret must be set");
        }
        self.verification_base_url()?;
        if let MailConfig::Http { endpoint, .. } = &self.mail {
            Url::parse(endpoint).context("invalid modules.accounts.mail.endpoint")?;
        }
        Ok(())
    }

    /// Parsed prefix of verification links.
    pub fn verification_base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&self.verification_base_url)
            .context("invalid modules.accounts.verification_base_url")?;
        if url.cannot_be_a_base() {
            bail!("modules.accounts.verification_base_url must be a hierarchical URL");
        }
        Ok(url)
    }
}

fn default_verification_base_url() -> String {
    "http://localhost:3000/".to_string()
}

fn default_mail_timeout_sec() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AccountsConfig::default();
        assert_eq!(config.verification_base_url, "http://localhost:3000/");
        assert!(matches!(config.mail, MailConfig::Log));
    }

    #[test]
    fn http_transport_from_json() {
        let json = r#"{
            "jwt_secret": "s3cret",
            "mail": {
                "transport": "http",
                "endpoint": "https://api.resend.com/emails",
                "api_key": "re_123",
                "from": "noreply@example.com"
            }
        }"#;
        let config: AccountsConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.jwt_secret, "s3cret");
        match config.mail {
            MailConfig::Http {
                endpoint,
                timeout_sec,
                ..
            } => {
                assert_eq!(endpoint, "https://api.resend.com/emails");
                assert_eq!(timeout_sec, 30);
            }
            MailConfig::Log => panic!("Expected http transport"),
        }
    }

    #[test]
    fn validate_requires_secret_and_sane_values() {
        let mut config = AccountsConfig::default();
        assert!(config.validate().is_err());

        config.jwt_secret = "s".into();
        assert!(config.validate().is_ok());

        config.verification_base_url = "mailto:someone@example.com".into();
        assert!(config.validate().is_err());

        config.verification_base_url = "https://app.example.com/".into();
        config.mail = MailConfig::Http {
            endpoint: "not a url".into(),
            api_key: "k".into(),
            from: "f@example.com".into(),
            timeout_sec: 5,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<AccountsConfig, _> = serde_json::from_str(r#"{"page_size": 10}"#);
        assert!(result.is_err());

        // Bearer lifetime is fixed, not configurable.
        let result: Result<AccountsConfig, _> =
            serde_json::from_str(r#"{"jwt_secret": "s", "token_ttl_days": 7}"#);
        assert!(result.is_err());
    }
}
