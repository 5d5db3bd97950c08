//! JSON content API.
//!
//! Thin handlers over the gateway accessors. `?fresh=true` bypasses the
//! cache for a request, which is mainly useful when checking the effect of
//! a CMS edit before the webhook lands.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use vitrina_content::{Category, HomePage, Project, Statistic, TeamMember};

use crate::error::ApiError;
use crate::gateway::{self, FetchPolicy};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(default)]
    pub fresh: bool,
}

impl ContentQuery {
    fn policy(self) -> FetchPolicy {
        if self.fresh {
            FetchPolicy::Bypass
        } else {
            FetchPolicy::Cached
        }
    }
}

/// Aggregate payload for the landing page, with the caps from the home
/// page entry already applied.
#[derive(Debug, Clone, Serialize)]
pub struct HomeContent {
    pub page: Option<HomePage>,
    pub featured: Vec<Project>,
    pub gallery: Vec<Project>,
    pub statistics: Vec<Statistic>,
    pub team: Vec<TeamMember>,
}

/// `GET /api/content/home`
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<HomeContent>, ApiError> {
    let policy = query.policy();
    let page = gateway::home_page(&state, policy).await;
    let mut featured = gateway::featured_projects(&state, policy).await;
    let gallery = gateway::home_gallery_projects(&state, policy).await;
    let mut statistics = gateway::statistics(&state, policy).await;
    let mut team = gateway::team_members(&state, policy).await;

    if let Some(page) = &page {
        cap(&mut featured, page.max_featured_projects);
        cap(&mut statistics, page.max_statistics);
        cap(&mut team, page.max_team_members);
    }

    Ok(Json(HomeContent {
        page,
        featured,
        gallery,
        statistics,
        team,
    }))
}

/// `GET /api/content/projects`
pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(gateway::projects(&state, query.policy()).await))
}

/// `GET /api/content/projects/slugs`
pub async fn project_slugs(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(gateway::project_slugs(&state, query.policy()).await))
}

/// `GET /api/content/projects/{slug}`
pub async fn project_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Project>, ApiError> {
    gateway::project_by_slug(&state, &slug, query.policy())
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("project '{slug}'")))
}

/// `GET /api/content/team`
pub async fn team(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<TeamMember>>, ApiError> {
    Ok(Json(gateway::team_members(&state, query.policy()).await))
}

/// `GET /api/content/statistics`
pub async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<Statistic>>, ApiError> {
    Ok(Json(gateway::statistics(&state, query.policy()).await))
}

/// `GET /api/content/categories`
pub async fn categories(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(gateway::categories(&state, query.policy()).await))
}

/// A cap of zero means "no limit".
fn cap<T>(items: &mut Vec<T>, limit: u32) {
    if limit > 0 {
        items.truncate(limit as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cap_keeps_everything() {
        let mut items = vec![1, 2, 3];
        cap(&mut items, 0);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn positive_cap_truncates() {
        let mut items = vec![1, 2, 3, 4];
        cap(&mut items, 2);
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn fresh_flag_selects_bypass() {
        assert_eq!(ContentQuery { fresh: true }.policy(), FetchPolicy::Bypass);
        assert_eq!(ContentQuery { fresh: false }.policy(), FetchPolicy::Cached);
    }
}
