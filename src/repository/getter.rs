//! Read repository.

use std::sync::Arc;

use switchboard_client::Toggle;
use tracing::warn;

use crate::error::Result;
use crate::interfaces::{ToggleCache, ToggleStore};

/// Serves reads cache-first with store fallback.
pub struct ToggleGetter {
    store: Arc<dyn ToggleStore>,
    cache: Arc<dyn ToggleCache>,
}

impl ToggleGetter {
    /// Create a getter over the shared store and cache.
    pub fn new(store: Arc<dyn ToggleStore>, cache: Arc<dyn ToggleCache>) -> Self {
        Self { store, cache }
    }

    /// Fetch a toggle by key.
    ///
    /// The cache is consulted first. A cache *error* (not a miss) propagates
    /// immediately instead of falling through to the store. A miss falls
    /// through; on store success the cache is repopulated best-effort.
    pub async fn get_by_key(&self, key: &str) -> Result<Toggle> {
        if let Some(toggle) = self.cache.get(key).await? {
            return Ok(toggle);
        }

        let toggle = self.store.get_by_key(key).await?;

        if let Err(e) = self.cache.set(&toggle).await {
            warn!(key = %key, error = %e, "cache repopulate after miss failed");
        }

        Ok(toggle)
    }

    /// Fetch up to `limit` toggles, straight from the store.
    pub async fn get_all(&self, limit: u32) -> Result<Vec<Toggle>> {
        self.store.get_all(limit).await
    }
}
