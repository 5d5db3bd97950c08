//! Landing page renderer.

use maud::{Markup, html};

use vitrina_content::{HomePage, Lang, Project, Statistic, TeamMember, translate};

use super::components::layout;

/// Render the landing page: hero gallery, featured projects, statistics,
/// and a team strip. Sections with no content are omitted rather than
/// rendered empty. The caps from the home page entry apply here too.
pub fn page(
    site_name: &str,
    lang: Lang,
    home: Option<&HomePage>,
    featured: &[Project],
    gallery: &[Project],
    statistics: &[Statistic],
    team: &[TeamMember],
) -> Markup {
    let featured = capped(featured, home.map_or(0, |h| h.max_featured_projects));
    let statistics = capped(statistics, home.map_or(0, |h| h.max_statistics));
    let team = capped(team, home.map_or(0, |h| h.max_team_members));

    let content = html! {
        @if let Some(home) = home {
            @if let Some(first) = home.hero_images.first() {
                div class="hero" { img src=(first) alt=(site_name); }
            }
        }

        @if !featured.is_empty() {
            h2 { (translate(lang, "home.featured")) }
            div class="grid" {
                @for project in featured {
                    (project_card(lang, project))
                }
            }
        }

        @if !gallery.is_empty() {
            div class="gallery" {
                @for project in gallery {
                    @if let Some(image) = project.gallery.first() {
                        img src=(image) alt=(project.title.get(lang));
                    }
                }
            }
        }

        @if !statistics.is_empty() {
            h2 { (translate(lang, "home.statistics")) }
            div class="stats" {
                @for stat in statistics {
                    div class="stat" {
                        div class="value" { (stat.value) (stat.unit.get(lang)) }
                        div class="label" { (stat.label.get(lang)) }
                    }
                }
            }
        }

        @if !team.is_empty() {
            h2 { (translate(lang, "home.team")) }
            div class="team" {
                @for member in team {
                    div class="member" {
                        @if let Some(photo) = &member.photo {
                            img src=(photo) alt=(member.name);
                        }
                        div class="name" { (member.name) }
                        div class="position" { (member.position.get(lang)) }
                    }
                }
            }
        }
    };

    layout(site_name, lang, site_name, content)
}

pub(super) fn project_card(lang: Lang, project: &Project) -> Markup {
    html! {
        a class="project-card" href={"/projects/" (project.slug) "?lang=" (lang.code())} {
            @if let Some(image) = project.gallery.first() {
                img src=(image) alt=(project.title.get(lang));
            }
            div class="body" {
                div class="title" { (project.title.get(lang)) }
                @let location = project.location.get(lang);
                @if !location.is_empty() {
                    div class="meta" { (location) }
                }
            }
        }
    }
}

fn capped<T>(items: &[T], limit: u32) -> &[T] {
    if limit > 0 && items.len() > limit as usize {
        &items[..limit as usize]
    } else {
        items
    }
}
