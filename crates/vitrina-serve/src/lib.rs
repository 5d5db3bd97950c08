//! Vitrina Serve - HTTP server for the bilingual corporate site.
//!
//! Editorial content lives in an external headless CMS; this server reads it
//! through a typed gateway, caches the results with tags, and lets the CMS
//! evict those caches through an authenticated webhook.
//!
//! # Architecture
//!
//! - **CMS client**: delivery-API reads with bounded reference expansion and
//!   cycle-guarded link resolution
//! - **Gateway**: one typed accessor per collection; fetch → resolve → clean
//!   → decode → filter active → sort by order; failures become empty results
//! - **Tagged cache**: in-process moka cache with a tag index, time-boxed as
//!   a fallback, explicitly invalidated by the revalidation endpoint
//! - **Routes**: rendered pages (`/`, `/projects`, `/projects/{slug}`,
//!   `/team`), a JSON content boundary under `/api/content`, the
//!   revalidation webhook, and the contact endpoint
//!
//! # Security
//!
//! - The revalidation webhook requires an exact shared-secret header match
//!   and fails closed when no secret is configured
//! - All dynamic page and email content is HTML-escaped by maud

pub mod auth;
pub mod cache;
pub mod cms;
mod error;
pub mod gateway;
pub mod mailer;
pub mod render;
mod routes;
mod state;

pub use self::cache::TaggedCache;
pub use self::error::ApiError;
pub use self::mailer::{HttpMailer, Mailer, OutboundEmail};
pub use self::routes::router;
pub use self::state::{AppState, Config};
