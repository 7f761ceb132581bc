//! Lazily populated caches for the series/season/episode hierarchy
//!
//! Three independent key→result-list maps, one per hierarchy level. Entries
//! are inserted on first successful fetch and only removed by [`HierarchyCache::clear`].
//! Lookups and inserts are safe under concurrent access; the check-then-fetch
//! sequence itself is not atomic, so two callers missing on the same key may
//! both run the remote fetch.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::Result;
use crate::types::CatalogItem;

type ItemMap = DashMap<String, Arc<Vec<CatalogItem>>>;

/// In-memory cache of remote catalog lookups.
///
/// Keys are search terms (series level) or parent identifiers (season and
/// episode levels). Values are the item lists exactly as the server returned
/// them; name filtering happens at read time in the walker, never here.
#[derive(Debug, Default)]
pub struct HierarchyCache {
    series: ItemMap,
    seasons: ItemMap,
    episodes: ItemMap,
}

impl HierarchyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Series search results keyed by subject name.
    pub async fn series<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<Vec<CatalogItem>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CatalogItem>>>,
    {
        get_or_fetch(&self.series, key, fetch).await
    }

    /// Season listings keyed by series identifier.
    pub async fn seasons<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<Vec<CatalogItem>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CatalogItem>>>,
    {
        get_or_fetch(&self.seasons, key, fetch).await
    }

    /// Episode listings keyed by season identifier, or by series identifier
    /// on the direct-listing fallback path.
    pub async fn episodes<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<Vec<CatalogItem>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CatalogItem>>>,
    {
        get_or_fetch(&self.episodes, key, fetch).await
    }

    /// Empty all three maps. Each map is cleared in turn; there is no
    /// cross-map atomicity.
    pub fn clear(&self) {
        self.series.clear();
        self.seasons.clear();
        self.episodes.clear();
    }
}

/// Return the cached list for `key`, or run `fetch`, store its result and
/// return it. A failed fetch caches nothing and propagates the error.
///
/// Not single-flight: no guard is held across the fetch, so concurrent
/// misses on the same key each issue their own remote call.
async fn get_or_fetch<F, Fut>(map: &ItemMap, key: &str, fetch: F) -> Result<Arc<Vec<CatalogItem>>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<CatalogItem>>>,
{
    if let Some(hit) = map.get(key) {
        return Ok(hit.value().clone());
    }

    let items = Arc::new(fetch().await?);
    map.insert(key.to_string(), Arc::clone(&items));
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JellyseekError;
    use crate::types::ItemKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn item(id: &str) -> CatalogItem {
        serde_json::from_str(&format!(r#"{{"Id": "{id}", "Type": "Series"}}"#)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_runs_at_most_once_per_key() {
        let cache = HierarchyCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let items = cache
                .series("naruto", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![item("S1")])
                })
                .await
                .unwrap();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].id, "S1");
            assert_eq!(items[0].kind, ItemKind::Series);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_forces_a_fresh_fetch() {
        let cache = HierarchyCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .series("naruto", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![item("S1")])
                })
                .await
                .unwrap();
            cache.clear();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = HierarchyCache::new();
        let calls = AtomicUsize::new(0);

        let result = cache
            .episodes("SE1", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(JellyseekError::InvalidConfig("boom".to_string()))
            })
            .await;
        assert!(result.is_err());

        let items = cache
            .episodes("SE1", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![item("E1")])
            })
            .await
            .unwrap();
        assert_eq!(items[0].id, "E1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_levels_do_not_share_keys() {
        let cache = HierarchyCache::new();

        let seasons = cache
            .seasons("S1", || async { Ok(vec![item("SE1")]) })
            .await
            .unwrap();
        let episodes = cache
            .episodes("S1", || async { Ok(vec![item("E1")]) })
            .await
            .unwrap();

        assert_eq!(seasons[0].id, "SE1");
        assert_eq!(episodes[0].id, "E1");
    }
}
