//! Content gateway: typed accessors over the CMS.
//!
//! Each accessor runs the same pipeline — delivery read with bounded
//! expansion, link splicing, reference cleaning, typed decode, active-only
//! filter, ascending sort by the declared order field — and exposes a
//! caller-supplied [`FetchPolicy`] instead of maintaining parallel cached
//! and uncached function pairs.
//!
//! Any failure contacting the CMS is absorbed at the accessor boundary:
//! collections come back empty, single lookups come back `None`, and a
//! diagnostic is logged. Callers see no other failure signal and there is
//! no retry.

use std::future::Future;

use serde_json::Value;

use vitrina_content::tags::tag;
use vitrina_content::{Category, ContentType, HomePage, Project, Statistic, TeamMember, clean};

use crate::cms::QueryOpts;
use crate::error::ApiError;
use crate::state::AppState;

/// Caching behavior for a gateway read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve from the tagged cache, computing on miss (server renders).
    Cached,
    /// Always hit the CMS (client-driven on-demand fetches).
    Bypass,
}

/// All projects, active and ordered.
pub async fn projects(state: &AppState, policy: FetchPolicy) -> Vec<Project> {
    collection(state, policy, "data:projects", &[tag::PROJECTS], || async {
        let items = fetch_cleaned(state, ContentType::Project, QueryOpts::default()).await?;
        Ok(decode_projects(&items))
    })
    .await
}

/// Projects flagged for the featured carousel. Feeds the home page.
pub async fn featured_projects(state: &AppState, policy: FetchPolicy) -> Vec<Project> {
    collection(
        state,
        policy,
        "data:featured-projects",
        &[tag::PROJECTS, tag::HOME],
        || async {
            let items = fetch_cleaned(state, ContentType::Project, QueryOpts::default()).await?;
            let mut projects = decode_projects(&items);
            projects.retain(|p| p.featured);
            Ok(projects)
        },
    )
    .await
}

/// Projects flagged for the home-page gallery. Feeds the home page.
pub async fn home_gallery_projects(state: &AppState, policy: FetchPolicy) -> Vec<Project> {
    collection(
        state,
        policy,
        "data:home-gallery-projects",
        &[tag::PROJECTS, tag::HOME],
        || async {
            let items = fetch_cleaned(state, ContentType::Project, QueryOpts::default()).await?;
            let mut projects = decode_projects(&items);
            projects.retain(|p| p.show_in_home_gallery);
            Ok(projects)
        },
    )
    .await
}

/// Active team members, ordered. Feeds the home page and `/team`.
pub async fn team_members(state: &AppState, policy: FetchPolicy) -> Vec<TeamMember> {
    collection(
        state,
        policy,
        "data:team-members",
        &[tag::TEAM, tag::HOME],
        || async {
            let items = fetch_cleaned(state, ContentType::TeamMember, QueryOpts::default()).await?;
            Ok(decode_team_members(&items))
        },
    )
    .await
}

/// Site-wide statistics. Feeds the home page.
pub async fn statistics(state: &AppState, policy: FetchPolicy) -> Vec<Statistic> {
    collection(
        state,
        policy,
        "data:statistics",
        &[tag::STATISTICS, tag::HOME],
        || async {
            let items = fetch_cleaned(state, ContentType::Statistic, QueryOpts::default()).await?;
            Ok(decode_statistics(&items))
        },
    )
    .await
}

/// Project categories.
pub async fn categories(state: &AppState, policy: FetchPolicy) -> Vec<Category> {
    collection(state, policy, "data:categories", &[tag::CATEGORIES], || async {
        let items = fetch_cleaned(state, ContentType::Category, QueryOpts::default()).await?;
        Ok(decode_categories(&items))
    })
    .await
}

/// The home-page singleton.
pub async fn home_page(state: &AppState, policy: FetchPolicy) -> Option<HomePage> {
    let result: Vec<HomePage> =
        collection(state, policy, "data:home-page", &[tag::HOME], || async {
            let opts = QueryOpts {
                limit: 1,
                ..QueryOpts::default()
            };
            let items = fetch_cleaned(state, ContentType::HomePage, opts).await?;
            Ok(items.iter().map(HomePage::from_entry).collect())
        })
        .await;
    result.into_iter().next()
}

/// A single active project by slug. `None` covers both "not found" and
/// "fetch failed".
pub async fn project_by_slug(state: &AppState, slug: &str, policy: FetchPolicy) -> Option<Project> {
    let key = format!("data:project:{slug}");
    let result: Vec<Project> = collection(
        state,
        policy,
        &key,
        &[tag::PROJECT_DETAIL],
        || async {
            let opts = QueryOpts {
                slug: Some(slug.to_string()),
                limit: 1,
                ..QueryOpts::default()
            };
            let items = fetch_cleaned(state, ContentType::Project, opts).await?;
            Ok(decode_projects(&items))
        },
    )
    .await;
    result.into_iter().next()
}

/// Lightweight slug index for navigation.
pub async fn project_slugs(state: &AppState, policy: FetchPolicy) -> Vec<String> {
    collection(state, policy, "data:project-slugs", &[tag::PROJECTS], || async {
        let opts = QueryOpts {
            include: 0,
            limit: 1000,
            ..QueryOpts::default()
        };
        let items = fetch_cleaned(state, ContentType::Project, opts).await?;
        Ok(decode_projects(&items).into_iter().map(|p| p.slug).collect())
    })
    .await
}

// ═══════════════════════════════════════════════════════════════════════════
// Pipeline
// ═══════════════════════════════════════════════════════════════════════════

/// Fetch entries of a content type and run the cleaning pass on each.
async fn fetch_cleaned(
    state: &AppState,
    content_type: ContentType,
    opts: QueryOpts,
) -> Result<Vec<Value>, ApiError> {
    let mut items = state.cms.entries(content_type.id(), &opts).await?;
    for item in items.iter_mut() {
        clean(item);
    }
    Ok(items)
}

/// Run a gateway read under the requested policy, absorbing failures into
/// an empty collection.
async fn collection<T, F, Fut>(
    state: &AppState,
    policy: FetchPolicy,
    key: &str,
    tags: &[&str],
    compute: F,
) -> Vec<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
    let result = match policy {
        FetchPolicy::Cached => state.cache.get_or_compute(key, tags, compute).await,
        FetchPolicy::Bypass => compute().await,
    };

    match result {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "content fetch failed; returning empty");
            Vec::new()
        }
    }
}

// Decoders are free functions over cleaned entry JSON so the filter/sort
// contract stays testable without a CMS.

pub(crate) fn decode_projects(items: &[Value]) -> Vec<Project> {
    let mut projects: Vec<Project> = items
        .iter()
        .filter_map(|item| Project::from_entry(item).ok())
        .filter(|p| p.active)
        .collect();
    projects.sort_by_key(|p| p.order);
    projects
}

pub(crate) fn decode_team_members(items: &[Value]) -> Vec<TeamMember> {
    let mut members: Vec<TeamMember> = items
        .iter()
        .map(TeamMember::from_entry)
        .filter(|m| m.active)
        .collect();
    members.sort_by_key(|m| m.order);
    members
}

pub(crate) fn decode_statistics(items: &[Value]) -> Vec<Statistic> {
    let mut stats: Vec<Statistic> = items
        .iter()
        .map(Statistic::from_entry)
        .filter(|s| s.active)
        .collect();
    stats.sort_by_key(|s| s.order);
    stats
}

pub(crate) fn decode_categories(items: &[Value]) -> Vec<Category> {
    let mut categories: Vec<Category> = items
        .iter()
        .filter_map(|item| Category::from_entry(item).ok())
        .filter(|c| c.active)
        .collect();
    categories.sort_by_key(|c| c.order);
    categories
}
