//! Event bus publishing interface.
//!
//! The subscriber side of the bus lives in `switchboard-client`
//! ([`switchboard_client::EventSubscriber`]) because consumer processes own
//! the drain loop; server-side bus implementations satisfy both sides.

use async_trait::async_trait;
use switchboard_client::ToggleEvent;

/// Errors that can occur during bus operations.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("subscribe failed: {0}")]
    Subscribe(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Interface for announcing toggle state changes.
///
/// Publishing is fire-and-forget relative to the triggering mutation: the
/// mutation has already committed by the time publish is attempted, so the
/// service layer logs and continues on failure rather than propagating it.
#[async_trait]
pub trait TogglePublisher: Send + Sync {
    /// Serialize the event and enqueue it on the message channel.
    async fn publish(&self, event: &ToggleEvent) -> Result<(), BusError>;
}
