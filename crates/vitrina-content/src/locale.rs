//! Bilingual (es/en) localization.
//!
//! Locale selection is a pure function of [`Lang`]; every localized field has
//! a defined fallback chain (other locale, then empty string) so that a
//! rendered page never sees a missing value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two site languages. Spanish is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    /// Parse a language code. Anything other than an English code falls back
    /// to Spanish, the site default.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Lang::En,
            _ => Lang::Es,
        }
    }

    /// The two-letter code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    /// The other site language.
    pub fn other(self) -> Self {
        match self {
            Lang::Es => Lang::En,
            Lang::En => Lang::Es,
        }
    }
}

/// A field with one value per site language.
///
/// Missing translations are stored as empty strings; [`Localized::get`]
/// falls back to the other locale before yielding `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub es: String,
    pub en: String,
}

impl Localized {
    /// Build from two values.
    pub fn new(es: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            es: es.into(),
            en: en.into(),
        }
    }

    /// Select the value for `lang`, falling back to the other locale and
    /// finally to the empty string. Never yields a missing value.
    pub fn get(&self, lang: Lang) -> &str {
        let (primary, fallback) = match lang {
            Lang::Es => (&self.es, &self.en),
            Lang::En => (&self.en, &self.es),
        };
        if !primary.is_empty() {
            primary
        } else {
            fallback
        }
    }

    /// Decode from a CMS field value.
    ///
    /// Delivery-API reads with `locale=*` wrap each field in a locale map
    /// (`{"es": ..., "en-US": ...}`); non-localized fields arrive as plain
    /// scalars, which populate both languages.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::new(s.clone(), s.clone()),
            Value::Number(n) => Self::new(n.to_string(), n.to_string()),
            Value::Object(map) => {
                let pick = |keys: &[&str]| {
                    keys.iter()
                        .find_map(|k| map.get(*k))
                        .and_then(scalar_to_string)
                        .unwrap_or_default()
                };
                Self {
                    es: pick(&["es", "es-ES", "es-AR"]),
                    en: pick(&["en", "en-US", "en-GB"]),
                }
            }
            _ => Self::default(),
        }
    }

    /// True when both locales are empty.
    pub fn is_empty(&self) -> bool {
        self.es.is_empty() && self.en.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Static UI translation catalog for chrome text on rendered pages.
///
/// Unknown keys return the empty string in release builds and the raw key in
/// debug builds, so missing entries surface during development without
/// leaking internal keys to visitors.
pub fn translate(lang: Lang, key: &str) -> String {
    let entry = CATALOG.iter().find(|(k, _, _)| *k == key);
    match entry {
        Some((_, es, en)) => match lang {
            Lang::Es => (*es).to_string(),
            Lang::En => (*en).to_string(),
        },
        None => {
            if cfg!(debug_assertions) {
                key.to_string()
            } else {
                String::new()
            }
        }
    }
}

/// (key, spanish, english)
const CATALOG: &[(&str, &str, &str)] = &[
    ("nav.home", "Inicio", "Home"),
    ("nav.projects", "Proyectos", "Projects"),
    ("nav.team", "Equipo", "Team"),
    ("home.featured", "Proyectos destacados", "Featured projects"),
    ("home.statistics", "Nuestras cifras", "Our numbers"),
    ("home.team", "Nuestro equipo", "Our team"),
    ("projects.title", "Proyectos", "Projects"),
    ("projects.back", "Volver a proyectos", "Back to projects"),
    ("projects.empty", "No hay proyectos disponibles.", "No projects available."),
    ("team.title", "Equipo", "Team"),
    ("team.empty", "No hay integrantes disponibles.", "No team members available."),
    ("notfound.title", "Proyecto no encontrado", "Project not found"),
    (
        "notfound.body",
        "El proyecto solicitado no existe o fue retirado.",
        "The requested project does not exist or has been removed.",
    ),
];
