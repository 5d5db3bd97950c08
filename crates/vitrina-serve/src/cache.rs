//! In-memory tagged caching with moka.
//!
//! Stored entries hold serialized JSON plus the set of tags they were
//! inserted under. The revalidation endpoint evicts by tag; a time-to-live
//! acts as a fallback for webhooks that never arrive. Page renders are
//! tagged with a synthetic `path:{path}` tag so path invalidation covers
//! every language variant of a page.
//!
//! Invalidation is idempotent: evicting a tag nobody has written is a no-op,
//! so at-least-once webhook delivery is harmless.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use moka::notification::RemovalCause;
use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ApiError;

/// Default cache capacity (number of entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Default TTL fallback for cached entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cached response with metadata.
#[derive(Clone, Debug)]
pub struct CachedEntry {
    /// Serialized JSON (or rendered HTML) payload.
    pub json: String,
    /// When this entry was cached.
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Tag-indexed cache over a moka store.
#[derive(Clone)]
pub struct TaggedCache {
    store: Cache<String, CachedEntry>,
    /// tag → keys inserted under that tag. The store's eviction listener
    /// prunes keys from every set when moka drops them, so the index stays
    /// bounded by the store; a dropped key may linger only until moka's
    /// deferred notification runs.
    index: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl Default for TaggedCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TaggedCache {
    /// Create a cache with default capacity and TTL.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL fallback.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(DEFAULT_CACHE_CAPACITY, ttl)
    }

    /// Create a cache with explicit capacity and TTL.
    pub fn with_limits(capacity: u64, ttl: Duration) -> Self {
        let index: Arc<RwLock<HashMap<String, HashSet<String>>>> =
            Arc::new(RwLock::new(HashMap::new()));

        // The store is the authority on liveness: whenever moka drops an
        // entry (TTL, capacity, explicit invalidation) its index entries go
        // too. Replacement keeps the key live, so its tags stay.
        let listener_index = Arc::clone(&index);
        let store = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .eviction_listener(move |key: Arc<String>, _entry, cause| {
                if cause == RemovalCause::Replaced {
                    return;
                }
                let mut index = listener_index.write();
                index.retain(|_, keys| {
                    keys.remove(key.as_str());
                    !keys.is_empty()
                });
            })
            .build();

        Self { store, index }
    }

    /// The synthetic tag carried by every cached render of `path`.
    pub fn path_tag(path: &str) -> String {
        format!("path:{path}")
    }

    /// Look up a cached entry.
    pub async fn get(&self, key: &str) -> Option<CachedEntry> {
        self.store.get(key).await
    }

    /// Insert an entry under a set of tags.
    pub async fn insert(&self, key: &str, json: String, tags: &[&str]) {
        {
            let mut index = self.index.write();
            for tag in tags {
                index
                    .entry((*tag).to_string())
                    .or_default()
                    .insert(key.to_string());
            }
        }
        let entry = CachedEntry {
            json,
            cached_at: chrono::Utc::now(),
        };
        self.store.insert(key.to_string(), entry).await;
    }

    /// Get a cached value or compute, serialize, and cache it.
    ///
    /// 1. Checks for a valid cached entry under `key`
    /// 2. If found, deserializes and returns it
    /// 3. If not found, calls `compute`, caches the result under `tags`,
    ///    and returns it
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        tags: &[&str],
        compute: F,
    ) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(entry) = self.get(key).await {
            match serde_json::from_str(&entry.json) {
                Ok(value) => {
                    tracing::debug!(key = %key, cached_at = %entry.cached_at, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    // Corrupted cache entry - log and continue to recompute
                    tracing::warn!(key = %key, error = %e, "failed to deserialize cached entry");
                }
            }
        }

        tracing::debug!(key = %key, "cache miss, computing");
        let value = compute().await?;

        match serde_json::to_string(&value) {
            Ok(json) => self.insert(key, json, tags).await,
            Err(e) => {
                // Failed to serialize - log but still return the value
                tracing::warn!(key = %key, error = %e, "failed to serialize for cache");
            }
        }

        Ok(value)
    }

    /// Evict every entry inserted under `tag`. Returns the number of keys
    /// evicted; an unknown tag evicts nothing.
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        // Take the key set first; moka invalidation awaits and the index
        // lock must not be held across it.
        let keys: Vec<String> = {
            let mut index = self.index.write();
            index.remove(tag).map(|set| set.into_iter().collect())
        }
        .unwrap_or_default();

        for key in &keys {
            self.store.invalidate(key).await;
        }
        keys.len()
    }

    /// Evict every cached render of a page path (all language variants).
    pub async fn invalidate_path(&self, path: &str) -> usize {
        self.invalidate_tag(&Self::path_tag(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cache_hit_skips_compute() {
        let cache = TaggedCache::new();
        let key = "test_key";

        // First call - cache miss
        let result: i32 = cache
            .get_or_compute(key, &["t"], || async { Ok(42) })
            .await
            .unwrap();
        assert_eq!(result, 42);

        // Second call - cache hit (compute should not be called)
        let result: i32 = cache
            .get_or_compute(key, &["t"], || async {
                panic!("compute should not be called on cache hit")
            })
            .await
            .unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn cache_different_keys() {
        let cache = TaggedCache::new();

        let a: i32 = cache
            .get_or_compute("key1", &[], || async { Ok(1) })
            .await
            .unwrap();
        let b: i32 = cache
            .get_or_compute("key2", &[], || async { Ok(2) })
            .await
            .unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn invalidate_tag_evicts_only_tagged_keys() {
        let cache = TaggedCache::new();
        cache.insert("a", "1".into(), &["projects"]).await;
        cache.insert("b", "2".into(), &["projects", "home"]).await;
        cache.insert("c", "3".into(), &["team"]).await;

        let evicted = cache.invalidate_tag("projects").await;
        assert_eq!(evicted, 2);

        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_none());
        assert!(cache.get("c").await.is_some());
    }

    #[tokio::test]
    async fn invalidate_is_idempotent() {
        let cache = TaggedCache::new();
        cache.insert("a", "1".into(), &["home"]).await;

        assert_eq!(cache.invalidate_tag("home").await, 1);
        assert_eq!(cache.invalidate_tag("home").await, 0);
        assert_eq!(cache.invalidate_tag("never-written").await, 0);
    }

    #[tokio::test]
    async fn invalidate_path_covers_language_variants() {
        let cache = TaggedCache::new();
        let path_tag = TaggedCache::path_tag("/projects");
        cache
            .insert("page:/projects:es", "<html es>".into(), &[&path_tag, "projects"])
            .await;
        cache
            .insert("page:/projects:en", "<html en>".into(), &[&path_tag, "projects"])
            .await;

        assert_eq!(cache.invalidate_path("/projects").await, 2);
        assert!(cache.get("page:/projects:es").await.is_none());
        assert!(cache.get("page:/projects:en").await.is_none());
    }

    #[tokio::test]
    async fn index_is_pruned_as_the_store_evicts() {
        let cache = TaggedCache::with_limits(64, DEFAULT_TTL);
        // Far more distinct slug keys than the store admits; only keys the
        // store actually holds may stay indexed.
        for i in 0..512 {
            let key = format!("data:project:{i}");
            cache.insert(&key, "null".into(), &["project-detail"]).await;
        }
        cache.store.run_pending_tasks().await;

        let indexed = cache
            .index
            .read()
            .get("project-detail")
            .map_or(0, |keys| keys.len());
        assert!(
            indexed <= 64,
            "index holds {indexed} keys for a store capped at 64"
        );
    }

    #[tokio::test]
    async fn invalidation_prunes_sibling_tag_sets() {
        let cache = TaggedCache::new();
        let path_tag = TaggedCache::path_tag("/projects/x");
        cache
            .insert(
                "page:/projects/x:es",
                "<html>".into(),
                &[&path_tag, "project-detail"],
            )
            .await;

        cache.invalidate_tag("project-detail").await;
        cache.store.run_pending_tasks().await;

        let index = cache.index.read();
        assert!(!index.contains_key("project-detail"));
        assert!(!index.contains_key(&path_tag));
    }

    #[tokio::test]
    async fn recompute_after_invalidation() {
        let cache = TaggedCache::new();
        let v: i32 = cache
            .get_or_compute("k", &["home"], || async { Ok(1) })
            .await
            .unwrap();
        assert_eq!(v, 1);

        cache.invalidate_tag("home").await;

        let v: i32 = cache
            .get_or_compute("k", &["home"], || async { Ok(2) })
            .await
            .unwrap();
        assert_eq!(v, 2);
    }
}
