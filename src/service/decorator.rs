//! Tracing decorator for the toggle services.
//!
//! Wraps the five capability traits and opens a span per operation, as plain
//! composition: the decorator implements the same interfaces it holds, so it
//! drops into any place the raw services fit.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::Toggle;

use crate::error::Result;
use crate::service::{
    CreateToggle, DeleteToggle, DisableToggle, EnableToggle, GetToggle,
};

/// Decorates the toggle services with tracing spans.
pub struct Tracing {
    creator: Arc<dyn CreateToggle>,
    getter: Arc<dyn GetToggle>,
    enabler: Arc<dyn EnableToggle>,
    disabler: Arc<dyn DisableToggle>,
    deleter: Arc<dyn DeleteToggle>,
}

impl Tracing {
    /// Create an instance of Tracing around the inner services.
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
impl CreateToggle for Tracing {
    #[tracing::instrument(name = "toggle.create", skip_all, fields(key = %key))]
    async fn create(&self, key: &str, description: &str) -> Result<()> {
        self.creator.create(key, description).await
    }
}

#[async_trait]
impl GetToggle for Tracing {
    #[tracing::instrument(name = "toggle.get_by_key", skip_all, fields(key = %key))]
    async fn get_by_key(&self, key: &str) -> Result<Toggle> {
        self.getter.get_by_key(key).await
    }

    #[tracing::instrument(name = "toggle.get_all", skip_all)]
    async fn get_all(&self) -> Result<Vec<Toggle>> {
        self.getter.get_all().await
    }
}

#[async_trait]
impl EnableToggle for Tracing {
    #[tracing::instrument(name = "toggle.enable", skip_all, fields(key = %key))]
    async fn enable(&self, key: &str) -> Result<()> {
        self.enabler.enable(key).await
    }
}

#[async_trait]
impl DisableToggle for Tracing {
    #[tracing::instrument(name = "toggle.disable", skip_all, fields(key = %key))]
    async fn disable(&self, key: &str) -> Result<()> {
        self.disabler.disable(key).await
    }
}

#[async_trait]
impl DeleteToggle for Tracing {
    #[tracing::instrument(name = "toggle.delete", skip_all, fields(key = %key))]
    async fn delete_by_key(&self, key: &str) -> Result<()> {
        self.deleter.delete_by_key(key).await
    }
}
