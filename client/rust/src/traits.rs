//! Abstract interfaces the client is built against.
//!
//! `ToggleTransport` is the RPC surface: the production implementation wraps
//! the generated gRPC stubs in the endpoint wiring, while tests and embedded
//! deployments use in-process implementations. `EventSubscriber` is the
//! message-channel drain loop the mirror feeds from; the server crate's bus
//! implementations satisfy it.

use async_trait::async_trait;
use tonic::Status;

use crate::types::{Toggle, ToggleEvent};

/// The remote toggle API as seen by the client.
///
/// Errors are `tonic::Status` so the circuit breaker can classify outcomes
/// by status code regardless of which transport carries the call.
#[async_trait]
pub trait ToggleTransport: Send + Sync {
    /// Create a new toggle. Fails with `AlreadyExists` on duplicate key and
    /// `InvalidArgument` on a malformed key or empty request.
    async fn create(&self, key: &str, description: &str) -> Result<(), Status>;

    /// Fetch a single toggle. Fails with `NotFound` if the key is absent.
    async fn get(&self, key: &str) -> Result<Toggle, Status>;

    /// Fetch all toggles, bounded by the server's default page size.
    async fn get_all(&self) -> Result<Vec<Toggle>, Status>;

    /// Set the toggle's flag to true. Fails with `NotFound` if absent.
    async fn enable(&self, key: &str) -> Result<(), Status>;

    /// Set the toggle's flag to false. Fails with `NotFound` if absent.
    async fn disable(&self, key: &str) -> Result<(), Status>;

    /// Delete a toggle. Fails with `FailedPrecondition` while enabled.
    async fn delete(&self, key: &str) -> Result<(), Status>;
}

/// Error returned by an event handler. Logged by the subscriber; never stops
/// the drain loop.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Handler invoked for each event drained from the channel.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: ToggleEvent) -> Result<(), HandlerError>;
}

/// Errors that abort a subscription drain loop.
///
/// Per-message problems (undecodable payload, handler failure) are logged
/// and skipped; only channel-level failure surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    /// The underlying message channel failed and the loop cannot continue.
    #[error("subscription failed: {0}")]
    Channel(String),
}

/// A source of toggle events.
///
/// `subscribe` blocks, draining the channel into the handler until the
/// subscriber is asked to stop, at which point it returns `Ok(())`. It runs
/// indefinitely and must be spawned on its own task so it never blocks
/// request-serving paths.
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    async fn subscribe(&self, handler: Box<dyn EventHandler>) -> Result<(), SubscribeError>;
}
