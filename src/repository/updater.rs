//! Flag-update repository.

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::interfaces::{ToggleCache, ToggleStore};

/// Cache field updated on the enable/disable fast path.
const IS_ENABLED_FIELD: &str = "is_enabled";

/// Updates the toggle flag in the store, then mirrors it into the cache.
pub struct ToggleUpdater {
    store: Arc<dyn ToggleStore>,
    cache: Arc<dyn ToggleCache>,
}

impl ToggleUpdater {
    /// Create an updater over the shared store and cache.
    pub fn new(store: Arc<dyn ToggleStore>, cache: Arc<dyn ToggleCache>) -> Self {
        Self { store, cache }
    }

    /// Set the toggle's flag.
    ///
    /// The authoritative store write comes first; its failure (including
    /// not-found) returns as-is. On success the flag is mirrored into the
    /// cache best-effort; that failure is logged and swallowed.
    pub async fn update_is_enabled(&self, key: &str, value: bool) -> Result<()> {
        self.store.update_is_enabled(key, value).await?;

        if let Err(e) = self
            .cache
            .set_field(key, IS_ENABLED_FIELD, &value.to_string())
            .await
        {
            warn!(key = %key, error = %e, "cache field update after flag change failed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToggleError;
    use crate::test_utils::{MockToggleCache, MockToggleStore};
    use switchboard_client::Toggle;

    #[tokio::test]
    async fn test_update_mirrors_flag_into_cache() {
        let store = Arc::new(MockToggleStore::new());
        let cache = Arc::new(MockToggleCache::new());
        let toggle = store.insert(&Toggle::new("dark-mode", "")).await.unwrap();
        cache.set(&toggle).await.unwrap();

        let updater = ToggleUpdater::new(store.clone(), cache.clone());
        updater.update_is_enabled("dark-mode", true).await.unwrap();

        assert!(store.get_by_key("dark-mode").await.unwrap().is_enabled);
        assert!(cache.get("dark-mode").await.unwrap().unwrap().is_enabled);
    }

    #[tokio::test]
    async fn test_absent_key_is_not_found() {
        let store = Arc::new(MockToggleStore::new());
        let cache = Arc::new(MockToggleCache::new());
        let updater = ToggleUpdater::new(store, cache);

        assert_eq!(
            updater.update_is_enabled("missing", true).await.unwrap_err(),
            ToggleError::NotFound
        );
    }

    #[tokio::test]
    async fn test_cache_failure_is_swallowed() {
        let store = Arc::new(MockToggleStore::new());
        let cache = Arc::new(MockToggleCache::new());
        store.insert(&Toggle::new("dark-mode", "")).await.unwrap();
        cache.set_fail_on_set(true).await;

        let updater = ToggleUpdater::new(store.clone(), cache);
        updater.update_is_enabled("dark-mode", true).await.unwrap();

        // Store remains authoritative.
        assert!(store.get_by_key("dark-mode").await.unwrap().is_enabled);
    }
}
