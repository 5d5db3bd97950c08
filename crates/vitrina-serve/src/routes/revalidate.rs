//! Revalidation webhook: authenticated cache invalidation.
//!
//! The CMS calls `POST /api/revalidate` when content changes. The handler is
//! a stateless four-step machine per request:
//!
//! 1. **Authenticate** the shared-secret header (fail closed when no secret
//!    is configured)
//! 2. **Classify** the changed content type from the body, trying known
//!    shapes in priority order with a header fallback
//! 3. **Dispatch** the type's invalidation plan against the tagged cache;
//!    an unclassifiable notification invalidates everything rather than
//!    being dropped
//! 4. **Respond** with the classified type and a timestamp, HTTP 200 even
//!    on the unknown fallback
//!
//! `GET` on the same path is a side-effect-free health probe.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::Value;

use vitrina_content::{ContentType, plan_for};

use crate::auth::verify_webhook_secret;
use crate::error::ApiError;
use crate::state::AppState;

/// Fallback header naming the content type when the body carries none.
pub const CONTENT_TYPE_FALLBACK_HEADER: &str = "x-contentful-content-type";

/// Webhook confirmation body.
#[derive(Debug, Clone, Serialize)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "entryId")]
    pub entry_id: Option<String>,
    pub timestamp: String,
}

/// Health-probe body for `GET /api/revalidate`.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub message: &'static str,
    pub timestamp: String,
}

/// `POST /api/revalidate`
pub async fn revalidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RevalidateResponse>, ApiError> {
    verify_webhook_secret(&state.config, &headers)?;

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| anyhow::anyhow!("webhook body is not valid JSON: {e}"))?;

    let content_type = classify(&payload, &headers);
    let entry_id = payload
        .pointer("/sys/id")
        .and_then(Value::as_str)
        .map(str::to_string);

    let plan = plan_for(content_type);
    let mut evicted = 0;
    for path in plan.paths {
        evicted += state.cache.invalidate_path(path).await;
    }
    for tag in plan.tags {
        evicted += state.cache.invalidate_tag(tag).await;
    }

    tracing::info!(
        content_type = content_type.id(),
        entry_id = entry_id.as_deref().unwrap_or(""),
        evicted,
        full_fallback = plan.is_full(),
        "revalidation dispatched"
    );

    Ok(Json(RevalidateResponse {
        revalidated: true,
        content_type: content_type.id().to_string(),
        entry_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// `GET /api/revalidate`
///
/// Static confirmation, no invalidation performed.
pub async fn probe() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        message: "revalidation endpoint ready",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Extract the content-type identifier from a webhook notification.
///
/// Shapes are tried in priority order:
/// 1. `sys.contentType.sys.id` (entry payload)
/// 2. `contentType.sys.id` (alternate topic payload)
/// 3. the `x-contentful-content-type` header
///
/// Anything unresolvable classifies as [`ContentType::Unknown`], which the
/// dispatch table maps to a full invalidation.
fn classify(payload: &Value, headers: &HeaderMap) -> ContentType {
    let from_body = payload
        .pointer("/sys/contentType/sys/id")
        .or_else(|| payload.pointer("/contentType/sys/id"))
        .and_then(Value::as_str);

    let id = from_body.or_else(|| {
        headers
            .get(CONTENT_TYPE_FALLBACK_HEADER)
            .and_then(|value| value.to_str().ok())
    });

    match id {
        Some(id) => ContentType::from_id(id),
        None => ContentType::Unknown,
    }
}
