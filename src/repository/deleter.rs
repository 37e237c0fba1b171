//! Delete repository.

use std::sync::Arc;

use switchboard_client::Toggle;
use tracing::debug;

use crate::error::{Result, ToggleError};
use crate::interfaces::{ToggleCache, ToggleStore};

/// Deletes toggles, guarding the business rule and the cache invariant.
///
/// Unlike the other repositories, cache failure here is NOT swallowed: a
/// deleted key must never survive in cache while gone from the store.
pub struct ToggleDeleter {
    store: Arc<dyn ToggleStore>,
    cache: Arc<dyn ToggleCache>,
}

impl ToggleDeleter {
    /// Create a deleter over the shared store and cache.
    pub fn new(store: Arc<dyn ToggleStore>, cache: Arc<dyn ToggleCache>) -> Self {
        Self { store, cache }
    }

    /// Fetch current state straight from the store, bypassing the cache.
    pub async fn get_by_key(&self, key: &str) -> Result<Toggle> {
        self.store.get_by_key(key).await
    }

    /// Delete a toggle by key.
    ///
    /// Reads current state from the store (never the cache) to enforce that
    /// an enabled toggle cannot be deleted. Deleting an absent key succeeds
    /// and returns `None`. On the happy path the cache entry is invalidated
    /// first (a failure there propagates), then the store row goes.
    /// Returns the deleted snapshot for event emission.
    pub async fn delete_by_key(&self, key: &str) -> Result<Option<Toggle>> {
        let toggle = match self.store.get_by_key(key).await {
            Ok(toggle) => toggle,
            Err(ToggleError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        if toggle.is_enabled {
            return Err(ToggleError::ProhibitedToDelete);
        }

        self.cache.delete(key).await?;
        self.store.delete(key).await?;

        debug!(key = %key, "deleted toggle and invalidated cache");
        Ok(Some(toggle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockToggleCache, MockToggleStore};

    async fn seeded(enabled: bool) -> (Arc<MockToggleStore>, Arc<MockToggleCache>) {
        let store = Arc::new(MockToggleStore::new());
        let cache = Arc::new(MockToggleCache::new());
        let toggle = store.insert(&Toggle::new("dark-mode", "")).await.unwrap();
        if enabled {
            store.update_is_enabled("dark-mode", true).await.unwrap();
        }
        cache.set(&toggle).await.unwrap();
        (store, cache)
    }

    #[tokio::test]
    async fn test_delete_removes_store_row_and_cache_entry() {
        let (store, cache) = seeded(false).await;
        let deleter = ToggleDeleter::new(store.clone(), cache.clone());

        let deleted = deleter.delete_by_key("dark-mode").await.unwrap();
        assert_eq!(deleted.unwrap().key, "dark-mode");
        assert_eq!(
            store.get_by_key("dark-mode").await.unwrap_err(),
            ToggleError::NotFound
        );
        assert!(cache.get("dark-mode").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_enabled_toggle_cannot_be_deleted() {
        let (store, cache) = seeded(true).await;
        let deleter = ToggleDeleter::new(store.clone(), cache);

        let err = deleter.delete_by_key("dark-mode").await.unwrap_err();
        assert_eq!(err, ToggleError::ProhibitedToDelete);

        // The store record is unchanged.
        assert!(store.get_by_key("dark-mode").await.unwrap().is_enabled);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_idempotent() {
        let store = Arc::new(MockToggleStore::new());
        let cache = Arc::new(MockToggleCache::new());
        let deleter = ToggleDeleter::new(store, cache);

        assert_eq!(deleter.delete_by_key("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cache_invalidation_failure_propagates() {
        let (store, cache) = seeded(false).await;
        cache.set_fail_on_delete(true).await;
        let deleter = ToggleDeleter::new(store.clone(), cache);

        assert!(deleter.delete_by_key("dark-mode").await.is_err());

        // The store row survives; the delete did not half-complete.
        assert!(store.get_by_key("dark-mode").await.is_ok());
    }

    #[tokio::test]
    async fn test_state_check_reads_store_not_cache() {
        let (store, cache) = seeded(false).await;
        // Poison the cache with an enabled snapshot; the store says disabled.
        let mut stale = Toggle::new("dark-mode", "");
        stale.is_enabled = true;
        cache.set(&stale).await.unwrap();

        let deleter = ToggleDeleter::new(store, cache);
        assert!(deleter.delete_by_key("dark-mode").await.unwrap().is_some());
    }
}
