//! Application state and configuration.

use std::sync::Arc;

use crate::cache::TaggedCache;
use crate::cms::CmsClient;
use crate::mailer::{DisabledMailer, HttpMailer, Mailer};

/// Application configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Public base URL of the site (used in canonical links).
    pub base_url: String,

    /// Site name shown in page titles.
    pub site_name: String,

    /// CMS space identifier.
    pub space_id: String,

    /// Read-only delivery-API access token.
    pub access_token: String,

    /// CMS environment name.
    pub environment: String,

    /// Delivery-API host. Overridable so tests can point at a stub.
    pub delivery_url: String,

    /// Shared secret for the revalidation webhook. When absent the endpoint
    /// fails closed with a server error.
    pub webhook_secret: Option<String>,

    /// Recipient for contact-form messages.
    pub contact_to: Option<String>,

    /// Transactional-email API endpoint and key. When absent, contact
    /// delivery fails with a server error.
    pub email_api_url: Option<String>,
    pub email_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CONTENTFUL_SPACE_ID`: CMS space identifier
    /// - `CONTENTFUL_ACCESS_TOKEN`: delivery-API token (read-only)
    ///
    /// Optional environment variables:
    /// - `VITRINA_BIND_ADDR`: Server bind address (default: "0.0.0.0:8080")
    /// - `VITRINA_BASE_URL`: Public base URL (default: "http://localhost:8080")
    /// - `VITRINA_SITE_NAME`: Site name (default: "Vitrina")
    /// - `CONTENTFUL_ENVIRONMENT`: Environment name (default: "master")
    /// - `CONTENTFUL_DELIVERY_URL`: Delivery host (default: public CDN host)
    /// - `CONTENTFUL_WEBHOOK_SECRET`: Revalidation shared secret
    /// - `CONTACT_EMAIL_TO`, `EMAIL_API_URL`, `EMAIL_API_KEY`: contact delivery
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("VITRINA_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let base_url = std::env::var("VITRINA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let site_name = std::env::var("VITRINA_SITE_NAME").unwrap_or_else(|_| "Vitrina".to_string());

        let space_id = std::env::var("CONTENTFUL_SPACE_ID")
            .map_err(|_| anyhow::anyhow!("CONTENTFUL_SPACE_ID environment variable is required"))?;

        let access_token = std::env::var("CONTENTFUL_ACCESS_TOKEN").map_err(|_| {
            anyhow::anyhow!("CONTENTFUL_ACCESS_TOKEN environment variable is required")
        })?;

        let environment = std::env::var("CONTENTFUL_ENVIRONMENT")
            .unwrap_or_else(|_| vitrina_content::DEFAULT_ENVIRONMENT.to_string());

        let delivery_url = std::env::var("CONTENTFUL_DELIVERY_URL")
            .unwrap_or_else(|_| "https://cdn.contentful.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let webhook_secret = std::env::var("CONTENTFUL_WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let contact_to = std::env::var("CONTACT_EMAIL_TO").ok().filter(|s| !s.is_empty());
        let email_api_url = std::env::var("EMAIL_API_URL").ok().filter(|s| !s.is_empty());
        let email_api_key = std::env::var("EMAIL_API_KEY").ok().filter(|s| !s.is_empty());

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            space_id = %space_id,
            environment = %environment,
            delivery_url = %delivery_url,
            webhook_secret_set = webhook_secret.is_some(),
            email_configured = email_api_url.is_some() && email_api_key.is_some(),
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            space_id,
            access_token,
            environment,
            delivery_url,
            webhook_secret,
            contact_to,
            email_api_url,
            email_api_key,
        })
    }
}

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// CMS delivery-API client.
    pub cms: CmsClient,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Tagged response/data cache.
    pub cache: TaggedCache,

    /// Contact-form delivery backend.
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> Self {
        let mailer: Arc<dyn Mailer> = match HttpMailer::from_config(&config) {
            Some(m) => Arc::new(m),
            None => {
                tracing::warn!("email delivery not configured; contact endpoint will fail closed");
                Arc::new(DisabledMailer)
            }
        };
        Self::with_mailer(config, mailer)
    }

    /// Create state with an explicit mailer (used by tests to spy on
    /// delivery).
    pub fn with_mailer(config: Config, mailer: Arc<dyn Mailer>) -> Self {
        let cms = CmsClient::from_config(&config);
        Self {
            cms,
            config: Arc::new(config),
            cache: TaggedCache::new(),
            mailer,
        }
    }
}
