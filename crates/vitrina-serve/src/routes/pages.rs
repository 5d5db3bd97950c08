//! Server-rendered HTML pages.
//!
//! Each page is rendered once per language and kept in the cache under a
//! `page:{path}:{lang}` key tagged with the page's path tag, so a webhook
//! invalidating `/projects` evicts both language variants at once.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;

use vitrina_content::Lang;
use vitrina_content::tags::{path, tag};

use crate::cache::TaggedCache;
use crate::gateway::{self, FetchPolicy};
use crate::render;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub lang: Option<String>,
}

impl PageQuery {
    fn lang(&self) -> Lang {
        self.lang
            .as_deref()
            .map(Lang::from_code)
            .unwrap_or_default()
    }
}

fn page_key(page_path: &str, lang: Lang) -> String {
    format!("page:{page_path}:{}", lang.code())
}

/// `GET /`
pub async fn home(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let lang = query.lang();
    let key = page_key(path::HOME, lang);
    if let Some(cached) = state.cache.get(&key).await {
        return Html(cached.json);
    }

    let page = gateway::home_page(&state, FetchPolicy::Cached).await;
    let featured = gateway::featured_projects(&state, FetchPolicy::Cached).await;
    let gallery = gateway::home_gallery_projects(&state, FetchPolicy::Cached).await;
    let statistics = gateway::statistics(&state, FetchPolicy::Cached).await;
    let team = gateway::team_members(&state, FetchPolicy::Cached).await;

    let html = render::home::page(
        &state.config.site_name,
        lang,
        page.as_ref(),
        &featured,
        &gallery,
        &statistics,
        &team,
    )
    .into_string();
    let path_tag = TaggedCache::path_tag(path::HOME);
    state
        .cache
        .insert(&key, html.clone(), &[path_tag.as_str(), tag::HOME])
        .await;
    Html(html)
}

/// `GET /projects`
pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let lang = query.lang();
    let key = page_key(path::PROJECTS, lang);
    if let Some(cached) = state.cache.get(&key).await {
        return Html(cached.json);
    }

    let projects = gateway::projects(&state, FetchPolicy::Cached).await;
    let html = render::projects::list(&state.config.site_name, lang, &projects).into_string();
    let path_tag = TaggedCache::path_tag(path::PROJECTS);
    state
        .cache
        .insert(&key, html.clone(), &[path_tag.as_str(), tag::PROJECTS])
        .await;
    Html(html)
}

/// `GET /projects/{slug}`
///
/// An unknown slug renders the not-found page with a 404 status; that
/// rendering is never cached.
pub async fn project_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> (StatusCode, Html<String>) {
    let lang = query.lang();
    let page_path = format!("/projects/{slug}");
    let key = page_key(&page_path, lang);
    if let Some(cached) = state.cache.get(&key).await {
        return (StatusCode::OK, Html(cached.json));
    }

    let Some(project) = gateway::project_by_slug(&state, &slug, FetchPolicy::Cached).await else {
        let html = render::projects::not_found(&state.config.site_name, lang).into_string();
        return (StatusCode::NOT_FOUND, Html(html));
    };

    let html = render::projects::detail(&state.config.site_name, lang, &project).into_string();
    let path_tag = TaggedCache::path_tag(&page_path);
    state
        .cache
        .insert(&key, html.clone(), &[path_tag.as_str(), tag::PROJECT_DETAIL])
        .await;
    (StatusCode::OK, Html(html))
}

/// `GET /team`
pub async fn team(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let lang = query.lang();
    let key = page_key(path::TEAM, lang);
    if let Some(cached) = state.cache.get(&key).await {
        return Html(cached.json);
    }

    let members = gateway::team_members(&state, FetchPolicy::Cached).await;
    let html = render::team::page(&state.config.site_name, lang, &members).into_string();
    let path_tag = TaggedCache::path_tag(path::TEAM);
    state
        .cache
        .insert(&key, html.clone(), &[path_tag.as_str(), tag::TEAM])
        .await;
    Html(html)
}
