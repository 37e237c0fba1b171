//! Toggle deletion.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::ToggleEvent;
use tracing::warn;

use crate::error::{Result, ToggleError};
use crate::interfaces::TogglePublisher;
use crate::repository;
use crate::service::DeleteToggle;

/// Deletes toggles.
///
/// The repository enforces the "cannot delete while enabled" rule against
/// the store; this layer surfaces an absent key as `NotFound` to the
/// requester and announces successful deletions.
pub struct ToggleDeleter {
    repo: Arc<repository::ToggleDeleter>,
    publisher: Arc<dyn TogglePublisher>,
}

impl ToggleDeleter {
    /// Create an instance of ToggleDeleter.
    pub fn new(repo: Arc<repository::ToggleDeleter>, publisher: Arc<dyn TogglePublisher>) -> Self {
        Self { repo, publisher }
    }
}

#[async_trait]
impl DeleteToggle for ToggleDeleter {
    async fn delete_by_key(&self, key: &str) -> Result<()> {
        let deleted = self
            .repo
            .delete_by_key(key)
            .await?
            .ok_or(ToggleError::NotFound)?;

        if let Err(e) = self.publisher.publish(&ToggleEvent::deleted(deleted)).await {
            warn!(key = %key, error = %e, "publish on toggle deletion failed");
        }
        Ok(())
    }
}
