//! Toggle disabling.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::{Toggle, ToggleEvent};
use tracing::warn;

use crate::error::Result;
use crate::interfaces::TogglePublisher;
use crate::repository;
use crate::service::DisableToggle;

/// Disables toggles.
pub struct ToggleDisabler {
    repo: Arc<repository::ToggleUpdater>,
    publisher: Arc<dyn TogglePublisher>,
}

impl ToggleDisabler {
    /// Create an instance of ToggleDisabler.
    pub fn new(repo: Arc<repository::ToggleUpdater>, publisher: Arc<dyn TogglePublisher>) -> Self {
        Self { repo, publisher }
    }
}

#[async_trait]
impl DisableToggle for ToggleDisabler {
    async fn disable(&self, key: &str) -> Result<()> {
        self.repo.update_is_enabled(key, false).await?;

        let snapshot = Toggle {
            key: key.to_string(),
            ..Toggle::default()
        };
        if let Err(e) = self
            .publisher
            .publish(&ToggleEvent::disabled(snapshot))
            .await
        {
            warn!(key = %key, error = %e, "publish on toggle disabling failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToggleError;
    use crate::interfaces::ToggleStore;
    use crate::test_utils::mock_adapters;
    use switchboard_client::ToggleEventName;

    #[tokio::test]
    async fn test_disable_updates_store_and_publishes() {
        let (store, cache, publisher) = mock_adapters();
        store.insert(&Toggle::new("dark-mode", "")).await.unwrap();
        store.update_is_enabled("dark-mode", true).await.unwrap();
        let repo = Arc::new(repository::ToggleUpdater::new(store.clone(), cache));
        let disabler = ToggleDisabler::new(repo, publisher.clone());

        disabler.disable("dark-mode").await.unwrap();

        assert!(!store.get_by_key("dark-mode").await.unwrap().is_enabled);
        let events = publisher.take_published().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, ToggleEventName::Disabled);
    }

    #[tokio::test]
    async fn test_disable_absent_key_is_not_found() {
        let (store, cache, publisher) = mock_adapters();
        let repo = Arc::new(repository::ToggleUpdater::new(store, cache));
        let disabler = ToggleDisabler::new(repo, publisher);

        assert_eq!(
            disabler.disable("missing").await.unwrap_err(),
            ToggleError::NotFound
        );
    }
}
