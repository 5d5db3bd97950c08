//! Team page renderer.

use maud::{Markup, html};

use vitrina_content::{Lang, TeamMember, translate};

use super::components::layout;

/// Render the team page.
pub fn page(site_name: &str, lang: Lang, members: &[TeamMember]) -> Markup {
    let title = translate(lang, "team.title");
    let content = html! {
        h1 { (title) }
        @if members.is_empty() {
            p class="empty" { (translate(lang, "team.empty")) }
        } @else {
            div class="team" {
                @for member in members {
                    div class="member" {
                        @if let Some(photo) = &member.photo {
                            img src=(photo) alt=(member.name);
                        }
                        div class="name" { (member.name) }
                        div class="position" { (member.position.get(lang)) }
                        @let bio = member.bio.get(lang);
                        @if !bio.is_empty() {
                            p class="bio" { (bio) }
                        }
                    }
                }
            }
        }
    };
    layout(site_name, lang, &title, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_content::Localized;

    #[test]
    fn empty_team_shows_message() {
        let rendered = page("Site", Lang::Es, &[]).into_string();
        assert!(rendered.contains("No hay integrantes disponibles."));
    }

    #[test]
    fn member_position_follows_language() {
        let members = vec![TeamMember {
            id: "m1".into(),
            name: "Ana Pérez".into(),
            position: Localized {
                es: "Arquitecta".into(),
                en: "Architect".into(),
            },
            photo: None,
            bio: Localized::default(),
            active: true,
            order: 0,
        }];
        let es = page("Site", Lang::Es, &members).into_string();
        assert!(es.contains("Arquitecta"));
        let en = page("Site", Lang::En, &members).into_string();
        assert!(en.contains("Architect"));
    }
}
