//! Contact-form email delivery.
//!
//! Delivery goes through a transactional-email HTTP API. The [`Mailer`]
//! trait is the seam: the production implementation POSTs to the configured
//! provider, while tests substitute a spy to assert on (or suppress)
//! delivery.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::Config;

/// An email ready for delivery. The HTML body is already escaped.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery backend for contact-form messages.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver the email, returning the provider's delivery identifier.
    async fn send(&self, email: &OutboundEmail) -> Result<String, ApiError>;
}

/// Production mailer: POSTs JSON to a transactional-email API with bearer
/// authentication.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    /// Build from configuration; `None` when the API URL or key is absent.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_url = config.email_api_url.clone()?;
        let api_key = config.email_api_key.clone()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("vitrina-serve/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Some(Self {
            http,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<String, ApiError> {
        let payload = serde_json::json!({
            "to": email.to,
            "reply_to": email.reply_to,
            "subject": email.subject,
            "html": email.html,
        });

        let body: Value = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let id = body
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        tracing::info!(delivery_id = %id, "contact email delivered");
        Ok(id)
    }
}

/// Stand-in used when no email provider is configured. Fails closed.
#[derive(Debug, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<String, ApiError> {
        Err(ApiError::Misconfigured("EMAIL_API_URL / EMAIL_API_KEY"))
    }
}
