//! Core types and shared logic for the Vitrina corporate-site backend.
//!
//! This crate provides:
//! - The typed content model for CMS-managed entries (projects, statistics,
//!   team members, categories, the home-page singleton)
//! - Bilingual (es/en) localization with defined fallbacks
//! - Cache tags and the content-type → invalidation dispatch table
//! - The reference-cleaning pass that projects CMS link graphs onto a
//!   cycle-free shape before they cross a serialization boundary
//! - Shared error types

pub mod clean;
mod error;
pub mod locale;
pub mod model;
pub mod tags;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Default CMS environment name when `CONTENTFUL_ENVIRONMENT` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Default reference-expansion depth for delivery-API reads.
///
/// Bounded to limit payload size: projects link statistics which link back
/// to their project, so unbounded expansion would duplicate entire subtrees.
pub const DEFAULT_INCLUDE_DEPTH: u8 = 2;

pub use clean::{MAX_CLEAN_DEPTH, clean};
pub use error::{Error, Result};
pub use locale::{Lang, Localized, translate};
pub use model::{
    Category, ContentType, EmbeddedStatistic, HomePage, Project, Statistic, TeamMember,
};
pub use tags::{InvalidationPlan, plan_for};
