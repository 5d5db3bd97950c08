//! Route definitions.
//!
//! ## Routes
//!
//! ### Pages (HTML, `?lang=es|en`)
//! - `GET /` - Landing page
//! - `GET /projects` - Project index
//! - `GET /projects/{slug}` - Project detail
//! - `GET /team` - Team page
//!
//! ### API (JSON)
//! - `GET /health` - Health check
//! - `GET /api/revalidate` - Webhook probe (no side effects)
//! - `POST /api/revalidate` - CMS webhook: invalidate cached content
//! - `POST /api/contact` - Contact-form delivery
//! - `GET /api/content/home` - Aggregated landing-page content
//! - `GET /api/content/projects` - Active projects
//! - `GET /api/content/projects/slugs` - Active project slugs
//! - `GET /api/content/projects/{slug}` - Single project
//! - `GET /api/content/team` - Active team members
//! - `GET /api/content/statistics` - Active site-wide statistics
//! - `GET /api/content/categories` - Active categories
//!
//! Content endpoints accept `?fresh=true` to bypass the cache.

mod contact;
mod content;
mod health;
mod pages;
mod revalidate;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the complete service router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/revalidate",
            get(revalidate::probe).post(revalidate::revalidate),
        )
        .route("/contact", post(contact::submit))
        .route("/content/home", get(content::home))
        .route("/content/projects", get(content::projects))
        .route("/content/projects/slugs", get(content::project_slugs))
        .route("/content/projects/{slug}", get(content::project_detail))
        .route("/content/team", get(content::team))
        .route("/content/statistics", get(content::statistics))
        .route("/content/categories", get(content::categories));

    let site = Router::new()
        .route("/", get(pages::home))
        .route("/projects", get(pages::projects))
        .route("/projects/{slug}", get(pages::project_detail))
        .route("/team", get(pages::team))
        .layer(middleware::map_response(add_cache_headers));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .merge(site)
        .with_state(state)
}

/// Mark rendered pages as cacheable by intermediaries. Freshness is owned
/// by the webhook, so the edge window stays short.
async fn add_cache_headers(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=60, stale-while-revalidate=300"),
    );
    response
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
