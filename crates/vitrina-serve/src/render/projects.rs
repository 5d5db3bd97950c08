//! Project list, detail, and not-found renderers.

use maud::{Markup, html};

use vitrina_content::{Lang, Project, translate};

use super::components::{layout, rich_text_plain};
use super::home::project_card;

/// Render the project index.
pub fn list(site_name: &str, lang: Lang, projects: &[Project]) -> Markup {
    let title = translate(lang, "projects.title");
    let content = html! {
        h1 { (title) }
        @if projects.is_empty() {
            p class="empty" { (translate(lang, "projects.empty")) }
        } @else {
            div class="grid" {
                @for project in projects {
                    (project_card(lang, project))
                }
            }
        }
    };
    layout(site_name, lang, &title, content)
}

/// Render a single project page.
pub fn detail(site_name: &str, lang: Lang, project: &Project) -> Markup {
    let title = project.title.get(lang);
    let description = rich_text_plain(&project.description);
    let content = html! {
        a class="back" href={"/projects?lang=" (lang.code())} {
            "← " (translate(lang, "projects.back"))
        }
        h1 { (title) }
        @if let Some(category) = &project.category {
            div class="meta" { (category.name.get(lang)) }
        }
        @let location = project.location.get(lang);
        @if !location.is_empty() {
            div class="meta" { (location) }
        }
        @if !description.is_empty() {
            div class="detail-body" { (description) }
        }
        @if !project.statistics.is_empty() {
            div class="stats" {
                @for stat in &project.statistics {
                    div class="stat" {
                        div class="value" { (stat.value) (stat.unit.get(lang)) }
                        div class="label" { (stat.label.get(lang)) }
                    }
                }
            }
        }
        @if !project.gallery.is_empty() {
            div class="gallery" {
                @for image in &project.gallery {
                    img src=(image) alt=(title);
                }
            }
        }
    };
    layout(site_name, lang, &title, content)
}

/// Render the not-found page for an unknown project slug.
pub fn not_found(site_name: &str, lang: Lang) -> Markup {
    let title = translate(lang, "notfound.title");
    let content = html! {
        h1 { (title) }
        p class="empty" { (translate(lang, "notfound.body")) }
        a class="back" href={"/projects?lang=" (lang.code())} {
            "← " (translate(lang, "projects.back"))
        }
    };
    layout(site_name, lang, &title, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrina_content::{EmbeddedStatistic, Localized};

    fn sample_project() -> Project {
        Project {
            id: "p1".into(),
            title: Localized {
                es: "Torre Norte".into(),
                en: "North Tower".into(),
            },
            slug: "torre-norte".into(),
            category: None,
            location: Localized {
                es: "Buenos Aires".into(),
                en: "Buenos Aires".into(),
            },
            description: json!({
                "nodeType": "document",
                "content": [
                    {"nodeType": "paragraph", "content": [{"nodeType": "text", "value": "Un edificio."}]}
                ]
            }),
            gallery: vec!["https://images.example/1.jpg".into()],
            videos: vec![],
            statistics: vec![EmbeddedStatistic {
                label: Localized {
                    es: "Pisos".into(),
                    en: "Floors".into(),
                },
                value: "30".into(),
                unit: Localized::default(),
                order: 0,
            }],
            active: true,
            featured: false,
            show_in_home_gallery: false,
            order: 1,
        }
    }

    #[test]
    fn detail_shows_language_variant() {
        let project = sample_project();
        let es = detail("Site", Lang::Es, &project).into_string();
        assert!(es.contains("Torre Norte"));
        assert!(es.contains("Pisos"));
        let en = detail("Site", Lang::En, &project).into_string();
        assert!(en.contains("North Tower"));
        assert!(en.contains("Floors"));
    }

    #[test]
    fn detail_renders_rich_text_description() {
        let rendered = detail("Site", Lang::Es, &sample_project()).into_string();
        assert!(rendered.contains("Un edificio."));
    }

    #[test]
    fn empty_list_shows_message() {
        let rendered = list("Site", Lang::En, &[]).into_string();
        assert!(rendered.contains("No projects available."));
    }

    #[test]
    fn not_found_is_localized() {
        let es = not_found("Site", Lang::Es).into_string();
        assert!(es.contains("Proyecto no encontrado"));
        let en = not_found("Site", Lang::En).into_string();
        assert!(en.contains("Project not found"));
    }
}
