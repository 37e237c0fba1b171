//! Test utilities and mock implementations.
//!
//! In-memory implementations of the core traits for testing without a
//! database, cache, or broker connection. Each mock has `set_fail_on_*`
//! switches to exercise the per-step failure policies.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use switchboard_client::{Toggle, ToggleEvent};
use tokio::sync::RwLock;

use crate::error::{Result, ToggleError};
use crate::interfaces::{BusError, ToggleCache, TogglePublisher, ToggleStore};

/// Mock durable store backed by an in-memory map.
#[derive(Default)]
pub struct MockToggleStore {
    toggles: RwLock<HashMap<String, Toggle>>,
    fail_on_insert: RwLock<bool>,
    fail_on_get: RwLock<bool>,
    fail_on_update: RwLock<bool>,
    fail_on_delete: RwLock<bool>,
    get_calls: RwLock<usize>,
}

impl MockToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_insert(&self, fail: bool) {
        *self.fail_on_insert.write().await = fail;
    }

    pub async fn set_fail_on_get(&self, fail: bool) {
        *self.fail_on_get.write().await = fail;
    }

    pub async fn set_fail_on_update(&self, fail: bool) {
        *self.fail_on_update.write().await = fail;
    }

    pub async fn set_fail_on_delete(&self, fail: bool) {
        *self.fail_on_delete.write().await = fail;
    }

    /// Number of stored toggles.
    pub async fn len(&self) -> usize {
        self.toggles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of `get_by_key` calls served so far.
    pub async fn get_calls(&self) -> usize {
        *self.get_calls.read().await
    }
}

#[async_trait]
impl ToggleStore for MockToggleStore {
    async fn insert(&self, toggle: &Toggle) -> Result<Toggle> {
        if *self.fail_on_insert.read().await {
            return Err(ToggleError::internal("mock insert failure"));
        }

        let mut toggles = self.toggles.write().await;
        if toggles.contains_key(&toggle.key) {
            return Err(ToggleError::AlreadyExists);
        }

        let now = Utc::now();
        let stored = Toggle {
            created_at: now,
            updated_at: now,
            ..toggle.clone()
        };
        toggles.insert(stored.key.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_by_key(&self, key: &str) -> Result<Toggle> {
        if *self.fail_on_get.read().await {
            return Err(ToggleError::internal("mock get failure"));
        }

        *self.get_calls.write().await += 1;
        self.toggles
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(ToggleError::NotFound)
    }

    async fn get_all(&self, limit: u32) -> Result<Vec<Toggle>> {
        if *self.fail_on_get.read().await {
            return Err(ToggleError::internal("mock get failure"));
        }

        Ok(self
            .toggles
            .read()
            .await
            .values()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_is_enabled(&self, key: &str, value: bool) -> Result<()> {
        if *self.fail_on_update.read().await {
            return Err(ToggleError::internal("mock update failure"));
        }

        let mut toggles = self.toggles.write().await;
        match toggles.get_mut(key) {
            Some(toggle) => {
                toggle.is_enabled = value;
                toggle.updated_at = Utc::now();
                Ok(())
            }
            None => Err(ToggleError::NotFound),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if *self.fail_on_delete.read().await {
            return Err(ToggleError::internal("mock delete failure"));
        }

        self.toggles.write().await.remove(key);
        Ok(())
    }
}

/// Mock cache backed by an in-memory map.
///
/// `set` and `set_field` share a failure switch since both are write-side
/// operations with the same swallow-and-log policy in callers.
#[derive(Default)]
pub struct MockToggleCache {
    entries: RwLock<HashMap<String, Toggle>>,
    fail_on_get: RwLock<bool>,
    fail_on_set: RwLock<bool>,
    fail_on_delete: RwLock<bool>,
}

impl MockToggleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_get(&self, fail: bool) {
        *self.fail_on_get.write().await = fail;
    }

    pub async fn set_fail_on_set(&self, fail: bool) {
        *self.fail_on_set.write().await = fail;
    }

    pub async fn set_fail_on_delete(&self, fail: bool) {
        *self.fail_on_delete.write().await = fail;
    }
}

#[async_trait]
impl ToggleCache for MockToggleCache {
    async fn get(&self, key: &str) -> Result<Option<Toggle>> {
        if *self.fail_on_get.read().await {
            return Err(ToggleError::internal("mock cache get failure"));
        }

        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, toggle: &Toggle) -> Result<()> {
        if *self.fail_on_set.read().await {
            return Err(ToggleError::internal("mock cache set failure"));
        }

        self.entries
            .write()
            .await
            .insert(toggle.key.clone(), toggle.clone());
        Ok(())
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<()> {
        if *self.fail_on_set.read().await {
            return Err(ToggleError::internal("mock cache set failure"));
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(key) {
            match field {
                "is_enabled" => {
                    entry.is_enabled = value.parse().map_err(ToggleError::internal)?;
                }
                other => {
                    return Err(ToggleError::internal(format!(
                        "mock cache has no field {other}"
                    )));
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if *self.fail_on_delete.read().await {
            return Err(ToggleError::internal("mock cache delete failure"));
        }

        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Mock publisher that records published events.
#[derive(Default)]
pub struct MockTogglePublisher {
    published: RwLock<Vec<ToggleEvent>>,
    fail_on_publish: RwLock<bool>,
}

impl MockTogglePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_publish(&self, fail: bool) {
        *self.fail_on_publish.write().await = fail;
    }

    pub async fn published_count(&self) -> usize {
        self.published.read().await.len()
    }

    pub async fn take_published(&self) -> Vec<ToggleEvent> {
        std::mem::take(&mut *self.published.write().await)
    }
}

#[async_trait]
impl TogglePublisher for MockTogglePublisher {
    async fn publish(&self, event: &ToggleEvent) -> std::result::Result<(), BusError> {
        if *self.fail_on_publish.read().await {
            return Err(BusError::Publish("mock publish failure".to_string()));
        }

        self.published.write().await.push(event.clone());
        Ok(())
    }
}

/// Convenience constructor for wired mock adapters.
pub fn mock_adapters() -> (
    Arc<MockToggleStore>,
    Arc<MockToggleCache>,
    Arc<MockTogglePublisher>,
) {
    (
        Arc::new(MockToggleStore::new()),
        Arc::new(MockToggleCache::new()),
        Arc::new(MockTogglePublisher::new()),
    )
}
