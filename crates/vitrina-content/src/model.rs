//! Typed content model for CMS-managed entries.
//!
//! Entries arrive as raw JSON from the delivery API (with `locale=*` locale
//! maps and resolved links) and are decoded here into owned structs. Two
//! deliberate shape decisions:
//!
//! - A statistic embedded inside a project is an [`EmbeddedStatistic`] with
//!   no owner link, structurally distinct from a standalone [`Statistic`]
//!   which may carry one. The back-reference cannot be forgotten at a
//!   serialization boundary because the embedded type cannot express it.
//! - Rich-text documents are carried as opaque [`serde_json::Value`]; the
//!   gateway only guarantees they are cycle-free and depth-bounded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::locale::Localized;

// ═══════════════════════════════════════════════════════════════════════════
// Content types
// ═══════════════════════════════════════════════════════════════════════════

/// The CMS schema identifier of an entry.
///
/// Unrecognized identifiers map to [`ContentType::Unknown`] rather than an
/// error: the revalidation endpoint must degrade to a full invalidation, not
/// drop the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    HomePage,
    Project,
    ProjectStatistic,
    Statistic,
    TeamMember,
    Category,
    Unknown,
}

impl ContentType {
    /// Parse a CMS content-type identifier.
    pub fn from_id(id: &str) -> Self {
        match id {
            "homePage" => Self::HomePage,
            "project" => Self::Project,
            "projectStatistic" => Self::ProjectStatistic,
            "statistic" => Self::Statistic,
            "teamMember" => Self::TeamMember,
            "category" => Self::Category,
            _ => Self::Unknown,
        }
    }

    /// The CMS identifier for this content type (`"unknown"` for the
    /// fallback variant).
    pub fn id(self) -> &'static str {
        match self {
            Self::HomePage => "homePage",
            Self::Project => "project",
            Self::ProjectStatistic => "projectStatistic",
            Self::Statistic => "statistic",
            Self::TeamMember => "teamMember",
            Self::Category => "category",
            Self::Unknown => "unknown",
        }
    }

    /// Extract the content type of an entry value from its `sys` metadata.
    pub fn of_entry(entry: &Value) -> Self {
        entry
            .pointer("/sys/contentType/sys/id")
            .and_then(Value::as_str)
            .map(Self::from_id)
            .unwrap_or(Self::Unknown)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Entities
// ═══════════════════════════════════════════════════════════════════════════

/// A portfolio project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: Localized,
    pub slug: String,
    pub category: Option<CategoryRef>,
    pub location: Localized,
    /// Rich-text document, cycle-free, rendered client-side.
    pub description: Value,
    pub gallery: Vec<String>,
    pub videos: Vec<String>,
    pub statistics: Vec<EmbeddedStatistic>,
    pub active: bool,
    pub featured: bool,
    pub show_in_home_gallery: bool,
    pub order: i64,
}

/// A category as referenced from a project (name and slug only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: Localized,
    pub slug: String,
}

/// A statistic embedded inside its owning project. Carries no owner link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddedStatistic {
    pub label: Localized,
    pub value: String,
    pub unit: Localized,
    pub order: i64,
}

/// A statistic fetched standalone (site-wide or per-project).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistic {
    pub id: String,
    pub label: Localized,
    pub value: String,
    pub unit: Localized,
    /// Slug of the owning project, when this is a per-project statistic.
    pub owner_slug: Option<String>,
    pub active: bool,
    pub order: i64,
}

/// A team member bio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub position: Localized,
    pub photo: Option<String>,
    pub bio: Localized,
    pub active: bool,
    pub order: i64,
}

/// A project category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: Localized,
    pub slug: String,
    pub description: Localized,
    pub active: bool,
    pub order: i64,
}

/// The home-page singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomePage {
    pub id: String,
    pub hero_images: Vec<String>,
    pub hero_video: Option<String>,
    /// Display caps; `0` means no cap.
    pub max_featured_projects: u32,
    pub max_team_members: u32,
    pub max_statistics: u32,
}

// ═══════════════════════════════════════════════════════════════════════════
// Decoding
// ═══════════════════════════════════════════════════════════════════════════

impl Project {
    /// Decode a project entry. The slug is required and must be URL-safe.
    pub fn from_entry(entry: &Value) -> Result<Self> {
        let slug = fields::string(entry, "slug").ok_or(Error::MissingField {
            field: "slug",
            content_type: "project",
        })?;
        validate_slug(&slug)?;

        let statistics = fields::entries(entry, "statistics")
            .into_iter()
            .map(EmbeddedStatistic::from_entry)
            .collect();

        let category = fields::entry(entry, "category").map(|cat| CategoryRef {
            name: fields::localized(cat, "name"),
            slug: fields::string(cat, "slug").unwrap_or_default(),
        });

        Ok(Self {
            id: entry_id(entry),
            title: fields::localized(entry, "title"),
            slug,
            category,
            location: fields::localized(entry, "location"),
            description: fields::raw(entry, "description"),
            gallery: fields::asset_urls(entry, "gallery"),
            videos: fields::string_list(entry, "videos"),
            statistics,
            active: fields::boolean(entry, "active", true),
            featured: fields::boolean(entry, "featured", false),
            show_in_home_gallery: fields::boolean(entry, "showInHomeGallery", false),
            order: fields::integer(entry, "order"),
        })
    }
}

impl EmbeddedStatistic {
    /// Decode a statistic entry into the owner-link-free embedded shape.
    /// Any `project` field the cleaner may have left behind is ignored.
    pub fn from_entry(entry: &Value) -> Self {
        Self {
            label: fields::localized(entry, "label"),
            value: fields::string(entry, "value").unwrap_or_default(),
            unit: fields::localized(entry, "unit"),
            order: fields::integer(entry, "order"),
        }
    }
}

impl Statistic {
    /// Decode a standalone statistic entry, keeping the owner slug when the
    /// owning project link was resolved.
    pub fn from_entry(entry: &Value) -> Self {
        let owner_slug = fields::entry(entry, "project").and_then(|p| fields::string(p, "slug"));
        Self {
            id: entry_id(entry),
            label: fields::localized(entry, "label"),
            value: fields::string(entry, "value").unwrap_or_default(),
            unit: fields::localized(entry, "unit"),
            owner_slug,
            active: fields::boolean(entry, "active", true),
            order: fields::integer(entry, "order"),
        }
    }
}

impl TeamMember {
    pub fn from_entry(entry: &Value) -> Self {
        Self {
            id: entry_id(entry),
            name: fields::string(entry, "name").unwrap_or_default(),
            position: fields::localized(entry, "position"),
            photo: fields::field(entry, "photo").and_then(fields::asset_url),
            bio: fields::localized(entry, "bio"),
            active: fields::boolean(entry, "active", true),
            order: fields::integer(entry, "order"),
        }
    }
}

impl Category {
    pub fn from_entry(entry: &Value) -> Result<Self> {
        let slug = fields::string(entry, "slug").ok_or(Error::MissingField {
            field: "slug",
            content_type: "category",
        })?;
        validate_slug(&slug)?;
        Ok(Self {
            id: entry_id(entry),
            name: fields::localized(entry, "name"),
            slug,
            description: fields::localized(entry, "description"),
            active: fields::boolean(entry, "active", true),
            order: fields::integer(entry, "order"),
        })
    }
}

impl HomePage {
    pub fn from_entry(entry: &Value) -> Self {
        Self {
            id: entry_id(entry),
            hero_images: fields::asset_urls(entry, "heroGallery"),
            hero_video: fields::string(entry, "heroVideo"),
            max_featured_projects: fields::integer(entry, "maxFeaturedProjects").max(0) as u32,
            max_team_members: fields::integer(entry, "maxTeamMembers").max(0) as u32,
            max_statistics: fields::integer(entry, "maxStatistics").max(0) as u32,
        }
    }
}

/// The entry's CMS id, or empty string when absent.
fn entry_id(entry: &Value) -> String {
    entry
        .pointer("/sys/id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Slugs must be non-empty and URL-safe.
fn validate_slug(slug: &str) -> Result<()> {
    let ok = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidSlug(slug.to_string()))
    }
}

/// Field-access helpers over raw entry JSON.
///
/// Every accessor tolerates both locale-mapped (`{"es": ...}`) and plain
/// field values, since `locale=*` reads wrap scalars per locale.
pub mod fields {
    use serde_json::Value;

    use crate::locale::Localized;

    /// Locale keys the delivery API may use as wrappers.
    const LOCALE_KEYS: &[&str] = &["es", "es-ES", "es-AR", "en", "en-US", "en-GB"];

    /// Fetch a raw field value from an entry.
    pub fn field<'a>(entry: &'a Value, name: &str) -> Option<&'a Value> {
        entry.pointer("/fields").and_then(|f| f.get(name))
    }

    /// Unwrap a locale map, preferring Spanish, then English, then the first
    /// member. Values that are not locale maps pass through unchanged.
    pub fn locale_pick(value: &Value) -> &Value {
        if let Value::Object(map) = value {
            if map.keys().any(|k| LOCALE_KEYS.contains(&k.as_str())) {
                return LOCALE_KEYS
                    .iter()
                    .find_map(|k| map.get(*k))
                    .or_else(|| map.values().next())
                    .unwrap_or(value);
            }
        }
        value
    }

    pub fn string(entry: &Value, name: &str) -> Option<String> {
        field(entry, name).map(locale_pick).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn boolean(entry: &Value, name: &str, default: bool) -> bool {
        field(entry, name)
            .map(locale_pick)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    pub fn integer(entry: &Value, name: &str) -> i64 {
        field(entry, name)
            .map(locale_pick)
            .and_then(Value::as_i64)
            .unwrap_or(0)
    }

    pub fn localized(entry: &Value, name: &str) -> Localized {
        field(entry, name)
            .map(Localized::from_value)
            .unwrap_or_default()
    }

    /// A field's value as an owned copy (for opaque rich-text documents).
    pub fn raw(entry: &Value, name: &str) -> Value {
        field(entry, name)
            .map(locale_pick)
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// A linked entry (single reference field).
    pub fn entry<'a>(entry: &'a Value, name: &str) -> Option<&'a Value> {
        field(entry, name)
            .map(locale_pick)
            .filter(|v| v.get("fields").is_some())
    }

    /// Linked entries (multi-reference field).
    pub fn entries<'a>(entry: &'a Value, name: &str) -> Vec<&'a Value> {
        field(entry, name)
            .map(locale_pick)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(locale_pick)
                    .filter(|v| v.get("fields").is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A list of plain strings.
    pub fn string_list(entry: &Value, name: &str) -> Vec<String> {
        field(entry, name)
            .map(locale_pick)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(locale_pick)
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The file URL of a resolved asset entry, normalized to `https:`.
    pub fn asset_url(asset: &Value) -> Option<String> {
        let url = locale_pick(asset)
            .pointer("/fields/file")
            .map(locale_pick)
            .and_then(|f| f.get("url"))
            .map(locale_pick)
            .and_then(Value::as_str)?;
        if let Some(rest) = url.strip_prefix("//") {
            Some(format!("https://{rest}"))
        } else {
            Some(url.to_string())
        }
    }

    /// File URLs of a multi-asset field, skipping unresolved links.
    pub fn asset_urls(entry: &Value, name: &str) -> Vec<String> {
        field(entry, name)
            .map(locale_pick)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(asset_url).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_entry() -> Value {
        json!({
            "sys": {"id": "p1", "contentType": {"sys": {"id": "project"}}},
            "fields": {
                "title": {"es": "Parque Solar", "en-US": "Solar Park"},
                "slug": {"es": "parque-solar"},
                "location": {"es": "Mendoza", "en-US": "Mendoza"},
                "active": {"es": true},
                "featured": {"es": true},
                "order": {"es": 3},
                "gallery": {"es": [
                    {"fields": {"file": {"es": {"url": "//img.cms.example/a.jpg"}}}}
                ]},
                "statistics": {"es": [
                    {
                        "sys": {"id": "s1", "contentType": {"sys": {"id": "projectStatistic"}}},
                        "fields": {
                            "label": {"es": "Capacidad", "en-US": "Capacity"},
                            "value": {"es": "120"},
                            "unit": {"es": "MW"},
                            "order": {"es": 1}
                        }
                    }
                ]},
                "category": {"es": {
                    "sys": {"id": "c1", "contentType": {"sys": {"id": "category"}}},
                    "fields": {"name": {"es": "Energía", "en-US": "Energy"}, "slug": {"es": "energia"}}
                }}
            }
        })
    }

    #[test]
    fn content_type_roundtrip() {
        for id in [
            "homePage",
            "project",
            "projectStatistic",
            "statistic",
            "teamMember",
            "category",
        ] {
            assert_eq!(ContentType::from_id(id).id(), id);
        }
    }

    #[test]
    fn content_type_unknown_id() {
        assert_eq!(ContentType::from_id("banner"), ContentType::Unknown);
        assert_eq!(ContentType::from_id(""), ContentType::Unknown);
        assert_eq!(ContentType::Unknown.id(), "unknown");
    }

    #[test]
    fn content_type_of_entry() {
        assert_eq!(ContentType::of_entry(&project_entry()), ContentType::Project);
        assert_eq!(ContentType::of_entry(&json!({})), ContentType::Unknown);
    }

    #[test]
    fn project_decodes() {
        let project = Project::from_entry(&project_entry()).unwrap();
        assert_eq!(project.id, "p1");
        assert_eq!(project.slug, "parque-solar");
        assert_eq!(project.title.en, "Solar Park");
        assert!(project.active);
        assert!(project.featured);
        assert!(!project.show_in_home_gallery);
        assert_eq!(project.order, 3);
        assert_eq!(project.gallery, vec!["https://img.cms.example/a.jpg"]);
        assert_eq!(project.statistics.len(), 1);
        assert_eq!(project.statistics[0].value, "120");
        assert_eq!(project.statistics[0].unit.es, "MW");
        assert_eq!(project.category.as_ref().unwrap().slug, "energia");
    }

    #[test]
    fn project_missing_slug_rejected() {
        let entry = json!({"sys": {"id": "p2"}, "fields": {"title": {"es": "x"}}});
        let err = Project::from_entry(&entry).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "slug", .. }));
    }

    #[test]
    fn project_unsafe_slug_rejected() {
        let entry = json!({"fields": {"slug": {"es": "has spaces/slashes"}}});
        let err = Project::from_entry(&entry).unwrap_err();
        assert!(matches!(err, Error::InvalidSlug(_)));
    }

    #[test]
    fn project_active_defaults_true() {
        let entry = json!({"fields": {"slug": "bare"}});
        let project = Project::from_entry(&entry).unwrap();
        assert!(project.active);
    }

    #[test]
    fn statistic_keeps_owner_slug_when_resolved() {
        let entry = json!({
            "sys": {"id": "s9", "contentType": {"sys": {"id": "projectStatistic"}}},
            "fields": {
                "label": {"es": "Empleos"},
                "value": {"es": 450},
                "project": {"es": {
                    "sys": {"id": "p1", "contentType": {"sys": {"id": "project"}}},
                    "fields": {"slug": {"es": "parque-solar"}}
                }}
            }
        });
        let stat = Statistic::from_entry(&entry);
        assert_eq!(stat.owner_slug.as_deref(), Some("parque-solar"));
        assert_eq!(stat.value, "450");
    }

    #[test]
    fn statistic_without_owner() {
        let entry = json!({
            "fields": {"label": {"es": "Años"}, "value": {"es": "30"}}
        });
        let stat = Statistic::from_entry(&entry);
        assert!(stat.owner_slug.is_none());
    }

    #[test]
    fn team_member_decodes() {
        let entry = json!({
            "sys": {"id": "t1"},
            "fields": {
                "name": {"es": "Ana Pérez"},
                "position": {"es": "Directora", "en-US": "Director"},
                "photo": {"es": {"fields": {"file": {"es": {"url": "//img.cms.example/ana.jpg"}}}}},
                "order": {"es": 2},
                "active": {"es": false}
            }
        });
        let member = TeamMember::from_entry(&entry);
        assert_eq!(member.name, "Ana Pérez");
        assert_eq!(member.position.en, "Director");
        assert_eq!(member.photo.as_deref(), Some("https://img.cms.example/ana.jpg"));
        assert!(!member.active);
    }

    #[test]
    fn home_page_decodes_caps() {
        let entry = json!({
            "sys": {"id": "h1"},
            "fields": {
                "maxFeaturedProjects": {"es": 6},
                "maxTeamMembers": {"es": 8}
            }
        });
        let home = HomePage::from_entry(&entry);
        assert_eq!(home.max_featured_projects, 6);
        assert_eq!(home.max_team_members, 8);
        assert_eq!(home.max_statistics, 0);
    }

    #[test]
    fn fields_tolerate_plain_values() {
        // Entries fetched with a single locale have unwrapped scalar fields.
        let entry = json!({"fields": {"slug": "plain-slug", "order": 5, "active": false}});
        assert_eq!(fields::string(&entry, "slug").as_deref(), Some("plain-slug"));
        assert_eq!(fields::integer(&entry, "order"), 5);
        assert!(!fields::boolean(&entry, "active", true));
    }
}
