//! Reference cleaning: project CMS link graphs onto a cycle-free shape.
//!
//! The CMS keeps bidirectional links (a project enumerates its statistics,
//! each statistic links back to its owning project). Resolved entry JSON must
//! never carry such a back-reference across a serialization boundary, so this
//! pass walks a fetched graph and applies a per-type **allow-list** of fields
//! to every embedded entry: a statistic embedded below a project simply has
//! no `project` field left, and a project embedded below a statistic has no
//! `statistics` field.
//!
//! The pass is idempotent (cleaning already-clean data is a no-op) and never
//! panics; fields that are already absent are skipped. Owned JSON trees
//! cannot be cyclic in Rust, but include expansion can duplicate subgraphs to
//! arbitrary depth, so a depth bound truncates anything nested deeper than
//! [`MAX_CLEAN_DEPTH`] to `null` as a last-resort defense.

use serde_json::Value;

use crate::model::ContentType;

/// Nodes nested deeper than this are truncated to `null`.
///
/// Generous: a fully expanded project (fields → locale map → statistic entry
/// → fields → locale map → scalar) sits well under ten levels.
pub const MAX_CLEAN_DEPTH: usize = 24;

/// Clean a fetched entry graph in place.
///
/// Top-level entries (or elements of a top-level array) keep their full
/// field set. A standalone statistic legitimately carries its owner link.
/// Every entry *embedded* below them is reduced to the allow-listed fields
/// of the type named in its own `sys` metadata.
pub fn clean(value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                walk(item, MAX_CLEAN_DEPTH, true);
            }
        }
        _ => walk(value, MAX_CLEAN_DEPTH, true),
    }
}

/// Fields an embedded entry of the given type may keep.
///
/// `None` means the type is unknown and its fields pass through untouched
/// (the depth bound still applies).
fn allowed_embedded_fields(content_type: ContentType) -> Option<&'static [&'static str]> {
    match content_type {
        // No `statistics`: that is the reciprocal back-reference when a
        // project sits below one of its own statistics.
        ContentType::Project => Some(&[
            "title",
            "slug",
            "location",
            "description",
            "gallery",
            "videos",
            "category",
            "order",
            "active",
            "featured",
            "showInHomeGallery",
        ]),
        // No `project`: the owner link is the back-reference.
        ContentType::ProjectStatistic | ContentType::Statistic => {
            Some(&["label", "value", "unit", "order", "active"])
        }
        ContentType::TeamMember => Some(&["name", "position", "photo", "bio", "order", "active"]),
        // No `projects` back-collection.
        ContentType::Category => Some(&["name", "slug", "description", "order", "active"]),
        ContentType::HomePage => Some(&[
            "heroGallery",
            "heroVideo",
            "maxFeaturedProjects",
            "maxTeamMembers",
            "maxStatistics",
        ]),
        ContentType::Unknown => None,
    }
}

fn walk(value: &mut Value, depth: usize, is_root: bool) {
    if depth == 0 {
        if value.is_object() || value.is_array() {
            *value = Value::Null;
        }
        return;
    }

    match value {
        Value::Object(_) => {
            let entry_type = ContentType::of_entry(value);
            let is_entry = value.get("fields").is_some();

            if is_entry && !is_root {
                if let Some(allowed) = allowed_embedded_fields(entry_type) {
                    if let Some(Value::Object(fields)) = value.get_mut("fields") {
                        fields.retain(|key, _| allowed.contains(&key.as_str()));
                    }
                }
            }

            if let Value::Object(map) = value {
                for child in map.values_mut() {
                    walk(child, depth - 1, false);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                walk(item, depth - 1, is_root);
            }
        }
        _ => {}
    }
}
