//! Shared-secret authentication for the revalidation webhook.

use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::state::Config;

/// Header the CMS webhook sends its shared secret in.
pub const WEBHOOK_SECRET_HEADER: &str = "x-contentful-secret";

/// Verify the webhook shared secret.
///
/// Fails closed: a server with no configured secret rejects every
/// notification with a server error rather than accepting unauthenticated
/// invalidations. A missing or mismatched header is rejected as
/// unauthorized; comparison is an exact string match.
pub fn verify_webhook_secret(config: &Config, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = config.webhook_secret.as_deref() else {
        return Err(ApiError::Misconfigured("CONTENTFUL_WEBHOOK_SECRET"));
    };

    let provided = headers
        .get(WEBHOOK_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(secret) if secret == expected => Ok(()),
        Some(_) => {
            tracing::warn!("revalidation webhook presented a mismatched secret");
            Err(ApiError::Unauthorized)
        }
        None => {
            tracing::warn!("revalidation webhook missing secret header");
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config_with_secret(secret: Option<&str>) -> Config {
        Config {
            bind_addr: String::new(),
            base_url: String::new(),
            site_name: String::new(),
            space_id: "space".into(),
            access_token: "token".into(),
            environment: "master".into(),
            delivery_url: String::new(),
            webhook_secret: secret.map(str::to_string),
            contact_to: None,
            email_api_url: None,
            email_api_key: None,
        }
    }

    fn headers_with_secret(secret: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(WEBHOOK_SECRET_HEADER, HeaderValue::from_str(secret).unwrap());
        headers
    }

    #[test]
    fn accepts_exact_match() {
        let config = config_with_secret(Some("hunter2"));
        assert!(verify_webhook_secret(&config, &headers_with_secret("hunter2")).is_ok());
    }

    #[test]
    fn rejects_mismatch() {
        let config = config_with_secret(Some("hunter2"));
        let err = verify_webhook_secret(&config, &headers_with_secret("wrong")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn rejects_missing_header() {
        let config = config_with_secret(Some("hunter2"));
        let err = verify_webhook_secret(&config, &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn fails_closed_without_configured_secret() {
        let config = config_with_secret(None);
        let err = verify_webhook_secret(&config, &headers_with_secret("anything")).unwrap_err();
        assert!(matches!(err, ApiError::Misconfigured(_)));
    }

    #[test]
    fn prefix_is_not_a_match() {
        let config = config_with_secret(Some("hunter2"));
        let err = verify_webhook_secret(&config, &headers_with_secret("hunter22")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
