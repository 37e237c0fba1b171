//! Toggle creation.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::{Toggle, ToggleEvent};
use tracing::warn;

use crate::error::Result;
use crate::interfaces::TogglePublisher;
use crate::repository;
use crate::service::CreateToggle;
use crate::validation;

/// Creates new toggles.
pub struct ToggleCreator {
    repo: Arc<repository::ToggleInserter>,
    publisher: Arc<dyn TogglePublisher>,
}

impl ToggleCreator {
    /// Create an instance of ToggleCreator.
    pub fn new(repo: Arc<repository::ToggleInserter>, publisher: Arc<dyn TogglePublisher>) -> Self {
        Self { repo, publisher }
    }
}

#[async_trait]
impl CreateToggle for ToggleCreator {
    async fn create(&self, key: &str, description: &str) -> Result<()> {
        validation::validate_key(key)?;

        let toggle = Toggle::new(validation::normalize_key(key), description.trim());
        let stored = self.repo.insert(&toggle).await?;

        if let Err(e) = self.publisher.publish(&ToggleEvent::created(stored)).await {
            warn!(key = %toggle.key, error = %e, "publish on toggle creation failed");
        }
        Ok(())
    }
}
