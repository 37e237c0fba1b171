//! In-memory channel event bus.
//!
//! Uses a tokio broadcast channel for pub/sub within a single process. Ideal
//! for local development and tests without external dependencies; it
//! implements both the publisher and subscriber sides of the bus.

use async_trait::async_trait;
use switchboard_client::{EventHandler, EventSubscriber, SubscribeError, ToggleEvent};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::interfaces::{BusError, TogglePublisher};

/// Channel capacity for broadcast.
const CHANNEL_CAPACITY: usize = 1024;

/// In-memory toggle event bus.
///
/// Clones share the same channel, so a cloned bus handed to a subscriber
/// receives events published through the original. Subscribers only see
/// events published after they subscribe.
#[derive(Clone)]
pub struct ChannelToggleBus {
    sender: broadcast::Sender<ToggleEvent>,
    cancel: watch::Sender<bool>,
}

impl ChannelToggleBus {
    /// Create a new channel bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (cancel, _) = watch::channel(false);
        Self { sender, cancel }
    }

    /// Ask every drain loop on this bus to stop after the in-flight message.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }
}

impl Default for ChannelToggleBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TogglePublisher for ChannelToggleBus {
    async fn publish(&self, event: &ToggleEvent) -> Result<(), BusError> {
        // No receivers is fine for publish-only scenarios.
        match self.sender.send(event.clone()) {
            Ok(receivers) => {
                debug!(key = %event.toggle.key, receivers, "published toggle event to channel");
            }
            Err(_) => {
                debug!(key = %event.toggle.key, "published toggle event (no receivers)");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EventSubscriber for ChannelToggleBus {
    async fn subscribe(&self, handler: Box<dyn EventHandler>) -> Result<(), SubscribeError> {
        let mut receiver = self.sender.subscribe();
        let mut cancel = self.cancel.subscribe();

        info!("channel subscriber started");

        loop {
            tokio::select! {
                result = receiver.recv() => match result {
                    Ok(event) => {
                        if let Err(e) = handler.handle(event).await {
                            warn!(error = %e, "event handler failed, continuing");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        error!(skipped, "channel subscriber lagged, skipped events");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        info!("channel closed, stopping subscriber");
                        return Ok(());
                    }
                },
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("channel subscriber stopped");
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
