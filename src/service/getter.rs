//! Toggle queries.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::Toggle;

use crate::error::Result;
use crate::interfaces::DEFAULT_GET_ALL_LIMIT;
use crate::repository;
use crate::service::GetToggle;

/// Serves toggle queries.
pub struct ToggleGetter {
    repo: Arc<repository::ToggleGetter>,
}

impl ToggleGetter {
    /// Create an instance of ToggleGetter.
    pub fn new(repo: Arc<repository::ToggleGetter>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl GetToggle for ToggleGetter {
    async fn get_by_key(&self, key: &str) -> Result<Toggle> {
        self.repo.get_by_key(key).await
    }

    async fn get_all(&self) -> Result<Vec<Toggle>> {
        self.repo.get_all(DEFAULT_GET_ALL_LIMIT).await
    }
}
