//! Insert repository.

use std::sync::Arc;

use switchboard_client::Toggle;
use tracing::warn;

use crate::error::Result;
use crate::interfaces::{ToggleCache, ToggleStore};

/// Writes new toggles to the store, then mirrors them into the cache.
pub struct ToggleInserter {
    store: Arc<dyn ToggleStore>,
    cache: Arc<dyn ToggleCache>,
}

impl ToggleInserter {
    /// Create an inserter over the shared store and cache.
    pub fn new(store: Arc<dyn ToggleStore>, cache: Arc<dyn ToggleCache>) -> Self {
        Self { store, cache }
    }

    /// Insert the toggle.
    ///
    /// The store write comes first and its error (duplicate or internal)
    /// returns untouched, without the cache being involved. On success the
    /// cache write is attempted; its failure is logged and swallowed since
    /// the entry can always be repopulated by a later read.
    pub async fn insert(&self, toggle: &Toggle) -> Result<Toggle> {
        let stored = self.store.insert(toggle).await?;

        if let Err(e) = self.cache.set(&stored).await {
            warn!(key = %stored.key, error = %e, "cache set after insert failed");
        }

        Ok(stored)
    }
}
