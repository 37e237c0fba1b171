//! Toggle enabling.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::{Toggle, ToggleEvent};
use tracing::warn;

use crate::error::Result;
use crate::interfaces::TogglePublisher;
use crate::repository;
use crate::service::EnableToggle;

/// Enables toggles.
///
/// Unlike creation there is no key validation here; an unknown key simply
/// surfaces as `NotFound` from the store.
pub struct ToggleEnabler {
    repo: Arc<repository::ToggleUpdater>,
    publisher: Arc<dyn TogglePublisher>,
}

impl ToggleEnabler {
    /// Create an instance of ToggleEnabler.
    pub fn new(repo: Arc<repository::ToggleUpdater>, publisher: Arc<dyn TogglePublisher>) -> Self {
        Self { repo, publisher }
    }
}

#[async_trait]
impl EnableToggle for ToggleEnabler {
    async fn enable(&self, key: &str) -> Result<()> {
        self.repo.update_is_enabled(key, true).await?;

        let snapshot = Toggle {
            key: key.to_string(),
            is_enabled: true,
            ..Toggle::default()
        };
        if let Err(e) = self.publisher.publish(&ToggleEvent::enabled(snapshot)).await {
            warn!(key = %key, error = %e, "publish on toggle enabling failed");
        }
        Ok(())
    }
}
