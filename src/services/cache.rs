use moka::future::{Cache, CacheBuilder};
use std::sync::Arc;
use std::time::Duration;
use crate::models::Catalog;
use crate::services::catalog::{CatalogError, CatalogStore};

/// Memoized catalog snapshot
///
/// Concurrent misses share a single load; once loaded the snapshot is served
/// until the TTL expires or [`CatalogCache::invalidate`] is called. A TTL of
/// zero disables caching and every request reloads.
pub struct CatalogCache {
    snapshot: Option<Cache<(), Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new(ttl_secs: u64) -> Self {
        let snapshot = (ttl_secs > 0).then(|| {
            CacheBuilder::new(1)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build()
        });

        Self { snapshot }
    }

    /// Cached snapshot, loading it from `store` on a miss
    pub async fn get_or_load(&self, store: &CatalogStore) -> Result<Arc<Catalog>, CatalogError> {
        match &self.snapshot {
            Some(cache) => {
                let catalog = cache.try_get_with((), store.load()).await?;
                tracing::trace!("Catalog snapshot served ({} camps)", catalog.camps.len());
                Ok(catalog)
            }
            None => store.load().await,
        }
    }

    /// Drop the cached snapshot so the next request reloads
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.snapshot {
            cache.invalidate(&()).await;
            tracing::debug!("Catalog snapshot invalidated");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.snapshot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Camp;

    fn static_store(camp_ids: &[&str]) -> CatalogStore {
        let camps = camp_ids
            .iter()
            .map(|id| {
                serde_json::from_value::<Camp>(serde_json::json!({ "id": id, "category": "CAMP" }))
                    .unwrap()
            })
            .collect();
        CatalogStore::Static(Arc::new(Catalog::from_camps(camps)))
    }

    #[tokio::test]
    async fn test_snapshot_memoized() {
        let cache = CatalogCache::new(60);
        let first = cache.get_or_load(&static_store(&["a"])).await.unwrap();

        // A different store is ignored while the snapshot is cached
        let second = cache.get_or_load(&static_store(&["b", "c"])).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.camps.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_reloads() {
        let cache = CatalogCache::new(60);
        cache.get_or_load(&static_store(&["a"])).await.unwrap();

        cache.invalidate().await;
        let reloaded = cache.get_or_load(&static_store(&["b", "c"])).await.unwrap();

        assert_eq!(reloaded.camps.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = CatalogCache::new(0);
        assert!(!cache.is_enabled());

        cache.get_or_load(&static_store(&["a"])).await.unwrap();
        let next = cache.get_or_load(&static_store(&["b", "c"])).await.unwrap();

        assert_eq!(next.camps.len(), 2);
    }

    #[tokio::test]
    async fn test_load_errors_propagate() {
        let cache = CatalogCache::new(60);
        let store = CatalogStore::File("/nonexistent/catalog.json".into());

        assert!(cache.get_or_load(&store).await.is_err());
    }
}
