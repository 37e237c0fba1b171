//! In-process transport for embedded and test deployments.
//!
//! Implements the client crate's `ToggleTransport` directly over the service
//! trait objects, bypassing the network. Together with the channel bus this
//! gives a fully wired toggle system inside one process.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::{Toggle, ToggleTransport};
use tonic::Status;

use crate::service::{CreateToggle, DeleteToggle, DisableToggle, EnableToggle, GetToggle};

/// Transport that calls the service layer directly.
pub struct LocalToggleTransport {
    creator: Arc<dyn CreateToggle>,
    getter: Arc<dyn GetToggle>,
    enabler: Arc<dyn EnableToggle>,
    disabler: Arc<dyn DisableToggle>,
    deleter: Arc<dyn DeleteToggle>,
}

impl LocalToggleTransport {
    /// Create a transport over the given services.
    pub fn new(
        creator: Arc<dyn CreateToggle>,
        getter: Arc<dyn GetToggle>,
        enabler: Arc<dyn EnableToggle>,
        disabler: Arc<dyn DisableToggle>,
        deleter: Arc<dyn DeleteToggle>,
    ) -> Self {
        Self {
            creator,
            getter,
            enabler,
            disabler,
            deleter,
        }
    }
}

#[async_trait]
impl ToggleTransport for LocalToggleTransport {
    async fn create(&self, key: &str, description: &str) -> Result<(), Status> {
        self.creator
            .create(key, description)
            .await
            .map_err(Status::from)
    }

    async fn get(&self, key: &str) -> Result<Toggle, Status> {
        self.getter.get_by_key(key).await.map_err(Status::from)
    }

    async fn get_all(&self) -> Result<Vec<Toggle>, Status> {
        self.getter.get_all().await.map_err(Status::from)
    }

    async fn enable(&self, key: &str) -> Result<(), Status> {
        self.enabler.enable(key).await.map_err(Status::from)
    }

    async fn disable(&self, key: &str) -> Result<(), Status> {
        self.disabler.disable(key).await.map_err(Status::from)
    }

    async fn delete(&self, key: &str) -> Result<(), Status> {
        self.deleter.delete_by_key(key).await.map_err(Status::from)
    }
}
