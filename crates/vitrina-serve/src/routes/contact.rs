//! Contact endpoint: validate, escape, deliver.
//!
//! User-supplied text is embedded in the outbound HTML through maud, which
//! escapes every interpolated value; a message containing `<script>` arrives
//! at the recipient as literal text.

use axum::Json;
use axum::extract::State;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::mailer::OutboundEmail;
use crate::state::AppState;

/// Contact-form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Delivery confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub id: String,
}

/// `POST /api/contact`
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    validate(&request)?;

    let to = state
        .config
        .contact_to
        .clone()
        .ok_or(ApiError::Misconfigured("CONTACT_EMAIL_TO"))?;

    let email = OutboundEmail {
        to,
        reply_to: request.email.trim().to_string(),
        subject: format!("[Contacto] {}", request.subject.trim()),
        html: email_html(&request).into_string(),
    };

    let id = state.mailer.send(&email).await?;
    Ok(Json(ContactResponse { id }))
}

/// Reject payloads with missing fields or a malformed email address.
fn validate(request: &ContactRequest) -> Result<(), ApiError> {
    let required = [
        ("name", &request.name),
        ("surname", &request.surname),
        ("email", &request.email),
        ("subject", &request.subject),
        ("message", &request.message),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("missing field '{field}'")));
        }
    }
    if !is_valid_email(&request.email) {
        return Err(ApiError::BadRequest("invalid email address".to_string()));
    }
    Ok(())
}

/// Minimal structural email check: one `@`, a dotted domain, no whitespace.
fn is_valid_email(address: &str) -> bool {
    let address = address.trim();
    if address.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Build the outbound HTML body. All interpolated values are escaped by
/// maud.
pub(crate) fn email_html(request: &ContactRequest) -> Markup {
    html! {
        div {
            h2 { "Nuevo mensaje de contacto" }
            p { strong { "Nombre: " } (request.name.trim()) " " (request.surname.trim()) }
            p { strong { "Email: " } (request.email.trim()) }
            p { strong { "Asunto: " } (request.subject.trim()) }
            p style="white-space:pre-wrap" { (request.message.trim()) }
        }
    }
}
