//! CMS delivery-API client.
//!
//! Reads published entries over HTTP with a bounded reference-expansion
//! depth (`include`) and all locales (`locale=*`). The delivery API returns
//! linked entries and assets out-of-band in an `includes` block; link nodes
//! inside `items` are spliced in place here, guarded by a visited set and a
//! depth bound so mutually-referential entries (a project and its
//! statistics) terminate instead of expanding forever.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::error::ApiError;
use crate::state::Config;

/// How many link-expansion steps resolution will take before leaving a link
/// unresolved. Matches the delivery API's own `include` ceiling for our
/// reads.
const RESOLVE_DEPTH: usize = 4;

/// Options for an entries read.
#[derive(Debug, Clone)]
pub struct QueryOpts {
    /// Reference-expansion depth requested from the CMS.
    pub include: u8,
    /// Equality filter on `fields.slug`.
    pub slug: Option<String>,
    /// Maximum number of items.
    pub limit: u32,
}

impl Default for QueryOpts {
    fn default() -> Self {
        Self {
            include: vitrina_content::DEFAULT_INCLUDE_DEPTH,
            slug: None,
            limit: 100,
        }
    }
}

/// Delivery-API client.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base: String,
    space: String,
    environment: String,
    token: String,
}

impl CmsClient {
    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vitrina-serve/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base: config.delivery_url.clone(),
            space: config.space_id.clone(),
            environment: config.environment.clone(),
            token: config.access_token.clone(),
        }
    }

    /// Fetch published entries of a content type, with links resolved.
    pub async fn entries(
        &self,
        content_type: &str,
        opts: &QueryOpts,
    ) -> Result<Vec<Value>, ApiError> {
        let url = format!(
            "{}/spaces/{}/environments/{}/entries",
            self.base, self.space, self.environment
        );

        let include = opts.include.to_string();
        let limit = opts.limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("content_type", content_type),
            ("include", &include),
            ("locale", "*"),
            ("limit", &limit),
        ];
        if let Some(slug) = opts.slug.as_deref() {
            query.push(("fields.slug", slug));
        }

        let body: Value = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(splice_links(body))
    }
}

/// Resolve link nodes in a delivery-API response body and return the items.
pub fn splice_links(body: Value) -> Vec<Value> {
    let entries = include_map(&body, "Entry");
    let assets = include_map(&body, "Asset");

    let items = match body.get("items").and_then(Value::as_array) {
        Some(items) => items.clone(),
        None => return Vec::new(),
    };

    items
        .into_iter()
        .map(|mut item| {
            let mut visiting = HashSet::new();
            resolve_links(&mut item, &entries, &assets, RESOLVE_DEPTH, &mut visiting);
            item
        })
        .collect()
}

/// Index an `includes` block by entry/asset id.
fn include_map(body: &Value, kind: &str) -> HashMap<String, Value> {
    body.pointer(&format!("/includes/{kind}"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let id = item.pointer("/sys/id")?.as_str()?;
                    Some((id.to_string(), item.clone()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// True when a value is an unresolved link node.
fn is_link(value: &Value) -> bool {
    value.pointer("/sys/type").and_then(Value::as_str) == Some("Link")
}

/// Replace link nodes with their resolved targets, in place.
///
/// A link to an id already being expanded (a cycle) or to a missing target
/// becomes `null`; the depth bound stops runaway expansion even for shapes
/// the visited set cannot see (distinct ids forming a long chain).
fn resolve_links(
    value: &mut Value,
    entries: &HashMap<String, Value>,
    assets: &HashMap<String, Value>,
    depth: usize,
    visiting: &mut HashSet<String>,
) {
    if is_link(value) {
        let id = value
            .pointer("/sys/id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let link_type = value.pointer("/sys/linkType").and_then(Value::as_str);

        let target = match link_type {
            Some("Asset") => assets.get(&id),
            _ => entries.get(&id),
        };

        *value = match target {
            Some(target) if depth > 0 && !visiting.contains(&id) => {
                let mut resolved = target.clone();
                visiting.insert(id.clone());
                resolve_links(&mut resolved, entries, assets, depth - 1, visiting);
                visiting.remove(&id);
                resolved
            }
            _ => Value::Null,
        };
        return;
    }

    match value {
        Value::Object(map) => {
            for child in map.values_mut() {
                resolve_links(child, entries, assets, depth, visiting);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                resolve_links(item, entries, assets, depth, visiting);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_link(id: &str) -> Value {
        json!({"sys": {"type": "Link", "linkType": "Entry", "id": id}})
    }

    #[test]
    fn splices_entry_and_asset_links() {
        let body = json!({
            "items": [{
                "sys": {"id": "p1", "contentType": {"sys": {"id": "project"}}},
                "fields": {
                    "slug": {"es": "eolico"},
                    "category": {"es": entry_link("c1")},
                    "gallery": {"es": [
                        {"sys": {"type": "Link", "linkType": "Asset", "id": "a1"}}
                    ]}
                }
            }],
            "includes": {
                "Entry": [{
                    "sys": {"id": "c1", "contentType": {"sys": {"id": "category"}}},
                    "fields": {"slug": {"es": "energia"}}
                }],
                "Asset": [{
                    "sys": {"id": "a1", "type": "Asset"},
                    "fields": {"file": {"es": {"url": "//img/x.jpg"}}}
                }]
            }
        });

        let items = splice_links(body);
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].pointer("/fields/category/es/fields/slug/es"),
            Some(&json!("energia"))
        );
        assert_eq!(
            items[0].pointer("/fields/gallery/es/0/fields/file/es/url"),
            Some(&json!("//img/x.jpg"))
        );
    }

    #[test]
    fn mutual_references_terminate() {
        // Project p1 links statistic s1 which links p1 back.
        let body = json!({
            "items": [{
                "sys": {"id": "p1", "contentType": {"sys": {"id": "project"}}},
                "fields": {"statistics": {"es": [entry_link("s1")]}}
            }],
            "includes": {"Entry": [
                {
                    "sys": {"id": "s1", "contentType": {"sys": {"id": "projectStatistic"}}},
                    "fields": {"value": {"es": "120"}, "project": {"es": entry_link("p1")}}
                },
                {
                    "sys": {"id": "p1", "contentType": {"sys": {"id": "project"}}},
                    "fields": {"statistics": {"es": [entry_link("s1")]}}
                }
            ]}
        });

        let items = splice_links(body);
        let stat = items[0].pointer("/fields/statistics/es/0").unwrap();
        assert_eq!(stat.pointer("/fields/value/es"), Some(&json!("120")));

        // The back-link expanded once, and its own statistics reference
        // hit the visited set and became null.
        let inner = stat.pointer("/fields/project/es").unwrap();
        assert_eq!(
            inner.pointer("/fields/statistics/es/0"),
            Some(&Value::Null)
        );

        // Whatever shape resolution produced must serialize.
        assert!(serde_json::to_string(&items).is_ok());
    }

    #[test]
    fn dangling_link_becomes_null() {
        let body = json!({
            "items": [{
                "sys": {"id": "p1"},
                "fields": {"category": {"es": entry_link("missing")}}
            }]
        });
        let items = splice_links(body);
        assert_eq!(items[0].pointer("/fields/category/es"), Some(&Value::Null));
    }

    #[test]
    fn empty_body_yields_no_items() {
        assert!(splice_links(json!({})).is_empty());
        assert!(splice_links(json!({"items": []})).is_empty());
    }
}
