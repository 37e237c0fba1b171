//! The toggle client: remote calls behind a circuit breaker plus a local,
//! eventually-consistent mirror.
//!
//! Every remote call goes through the breaker. Successful mutations update
//! the mirror immediately (optimistic local write), so the calling process
//! gets read-your-writes before any event arrives. A subscription loop keeps
//! the mirror fresh for a chosen key set; `is_enabled` reads the mirror and
//! falls back to a remote `get` on miss.

use std::future::Future;
use std::sync::Arc;

use tonic::Status;
use tracing::debug;

use crate::breaker::{is_breaker_relevant, BreakerState, CircuitBreaker, NoopBreaker};
use crate::error::{ClientError, Result};
use crate::mirror::{MirrorUpdater, ToggleMirror};
use crate::traits::{EventSubscriber, SubscribeError, ToggleTransport};
use crate::types::Toggle;

/// Client for the toggle service.
///
/// The mirror is owned by this instance; multiple clients in one process do
/// not share state. Cloning is cheap and clones share the same mirror and
/// breaker.
#[derive(Clone)]
pub struct ToggleClient {
    transport: Arc<dyn ToggleTransport>,
    breaker: Arc<dyn CircuitBreaker>,
    mirror: Arc<ToggleMirror>,
}

impl ToggleClient {
    /// Create a client with the default no-op breaker (always closed).
    pub fn new(transport: Arc<dyn ToggleTransport>) -> Self {
        Self::with_breaker(transport, Arc::new(NoopBreaker))
    }

    /// Create a client with a custom circuit breaker.
    pub fn with_breaker(
        transport: Arc<dyn ToggleTransport>,
        breaker: Arc<dyn CircuitBreaker>,
    ) -> Self {
        Self {
            transport,
            breaker,
            mirror: Arc::new(ToggleMirror::new()),
        }
    }

    /// Current breaker state; half-open and open mean the client is degraded.
    pub fn breaker_state(&self) -> BreakerState {
        self.breaker.state()
    }

    /// Execute a remote call through the breaker, classifying the outcome.
    ///
    /// Not-found and other client-class responses record as successes for
    /// the breaker but still propagate to the caller.
    async fn guarded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, Status>>,
    {
        if !self.breaker.try_acquire() {
            return Err(ClientError::CircuitOpen);
        }
        match call.await {
            Ok(value) => {
                self.breaker.record_success();
                Ok(value)
            }
            Err(status) => {
                if is_breaker_relevant(&status) {
                    self.breaker.record_failure();
                } else {
                    self.breaker.record_success();
                }
                Err(status.into())
            }
        }
    }

    /// Create a new toggle. On success the mirror records it as disabled.
    pub async fn create(&self, key: &str, description: &str) -> Result<()> {
        self.guarded(self.transport.create(key, description)).await?;
        self.mirror.set(key, false);
        Ok(())
    }

    /// Fetch a toggle by key, populating the mirror with the result.
    pub async fn get(&self, key: &str) -> Result<Toggle> {
        let toggle = self.guarded(self.transport.get(key)).await?;
        self.mirror.set(&toggle.key, toggle.is_enabled);
        Ok(toggle)
    }

    /// Fetch all toggles (bounded by the server's default page size).
    pub async fn get_all(&self) -> Result<Vec<Toggle>> {
        self.guarded(self.transport.get_all()).await
    }

    /// Enable a toggle. On success the mirror flips to true immediately.
    pub async fn enable(&self, key: &str) -> Result<()> {
        self.guarded(self.transport.enable(key)).await?;
        self.mirror.set(key, true);
        Ok(())
    }

    /// Disable a toggle. On success the mirror flips to false immediately.
    pub async fn disable(&self, key: &str) -> Result<()> {
        self.guarded(self.transport.disable(key)).await?;
        self.mirror.set(key, false);
        Ok(())
    }

    /// Delete a toggle. On success the key is dropped from the mirror.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.guarded(self.transport.delete(key)).await?;
        self.mirror.remove(key);
        Ok(())
    }

    /// Drain toggle events into this client's mirror, filtered to `keys`.
    ///
    /// Blocks until the subscriber is stopped; run it on its own task:
    ///
    /// ```ignore
    /// let client2 = client.clone();
    /// tokio::spawn(async move {
    ///     client2.subscribe(subscriber, vec!["dark-mode".into()]).await
    /// });
    /// ```
    pub async fn subscribe(
        &self,
        subscriber: Arc<dyn EventSubscriber>,
        keys: Vec<String>,
    ) -> std::result::Result<(), SubscribeError> {
        let updater = MirrorUpdater::new(self.mirror.clone(), keys);
        subscriber.subscribe(Box::new(updater)).await
    }

    /// Whether a toggle is enabled.
    ///
    /// Reads the mirror first; on miss performs a remote `get` (which also
    /// populates the mirror). A failed `get` propagates as an error rather
    /// than defaulting.
    pub async fn is_enabled(&self, key: &str) -> Result<bool> {
        if let Some(enabled) = self.mirror.get(key) {
            return Ok(enabled);
        }
        debug!(key = %key, "mirror miss, falling back to remote get");
        let toggle = self.get(key).await?;
        Ok(toggle.is_enabled)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::result::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tonic::Code;

    use super::*;
    use crate::breaker::{BreakerConfig, ThresholdBreaker};
    use crate::traits::EventHandler;
    use crate::types::ToggleEvent;

    /// Transport over an in-memory map, with an optional forced failure.
    #[derive(Default)]
    struct MockTransport {
        toggles: Mutex<HashMap<String, Toggle>>,
        fail_with: Mutex<Option<Code>>,
        calls: AtomicUsize,
    }

    impl MockTransport {
        fn with_toggle(key: &str, enabled: bool) -> Self {
            let transport = Self::default();
            let mut toggle = Toggle::new(key, "");
            toggle.is_enabled = enabled;
            transport
                .toggles
                .lock()
                .unwrap()
                .insert(key.to_string(), toggle);
            transport
        }

        fn set_fail_with(&self, code: Option<Code>) {
            *self.fail_with.lock().unwrap() = code;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn check(&self) -> Result<(), Status> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match *self.fail_with.lock().unwrap() {
                Some(code) => Err(Status::new(code, "mock failure")),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ToggleTransport for MockTransport {
        async fn create(&self, key: &str, description: &str) -> Result<(), Status> {
            self.check()?;
            self.toggles
                .lock()
                .unwrap()
                .insert(key.to_string(), Toggle::new(key, description));
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Toggle, Status> {
            self.check()?;
            self.toggles
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| Status::not_found(""))
        }

        async fn get_all(&self) -> Result<Vec<Toggle>, Status> {
            self.check()?;
            Ok(self.toggles.lock().unwrap().values().cloned().collect())
        }

        async fn enable(&self, key: &str) -> Result<(), Status> {
            self.check()?;
            match self.toggles.lock().unwrap().get_mut(key) {
                Some(toggle) => {
                    toggle.is_enabled = true;
                    Ok(())
                }
                None => Err(Status::not_found("")),
            }
        }

        async fn disable(&self, key: &str) -> Result<(), Status> {
            self.check()?;
            match self.toggles.lock().unwrap().get_mut(key) {
                Some(toggle) => {
                    toggle.is_enabled = false;
                    Ok(())
                }
                None => Err(Status::not_found("")),
            }
        }

        async fn delete(&self, key: &str) -> Result<(), Status> {
            self.check()?;
            self.toggles.lock().unwrap().remove(key);
            Ok(())
        }
    }

    /// Subscriber that replays a fixed list of events through the handler.
    struct ReplaySubscriber {
        events: Vec<ToggleEvent>,
    }

    #[async_trait]
    impl EventSubscriber for ReplaySubscriber {
        async fn subscribe(
            &self,
            handler: Box<dyn EventHandler>,
        ) -> Result<(), SubscribeError> {
            for event in &self.events {
                if let Err(e) = handler.handle(event.clone()).await {
                    tracing::warn!(error = %e, "handler failed");
                }
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_enable_updates_mirror_optimistically() {
        let transport = Arc::new(MockTransport::with_toggle("dark-mode", false));
        let client = ToggleClient::new(transport.clone());

        client.enable("dark-mode").await.unwrap();

        // One RPC so far; is_enabled must resolve from the mirror alone.
        assert_eq!(transport.calls(), 1);
        assert!(client.is_enabled("dark-mode").await.unwrap());
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_mirror_untouched() {
        let transport = Arc::new(MockTransport::with_toggle("dark-mode", true));
        let client = ToggleClient::new(transport.clone());

        transport.set_fail_with(Some(Code::Unavailable));
        assert!(client.disable("dark-mode").await.is_err());

        // Mirror never saw the key, so is_enabled falls back to the remote.
        transport.set_fail_with(None);
        assert!(client.is_enabled("dark-mode").await.unwrap());
    }

    #[tokio::test]
    async fn test_is_enabled_miss_falls_back_and_populates() {
        let transport = Arc::new(MockTransport::with_toggle("dark-mode", true));
        let client = ToggleClient::new(transport.clone());

        assert!(client.is_enabled("dark-mode").await.unwrap());
        let after_first = transport.calls();

        // Second read is served by the mirror.
        assert!(client.is_enabled("dark-mode").await.unwrap());
        assert_eq!(transport.calls(), after_first);
    }

    #[tokio::test]
    async fn test_is_enabled_get_failure_propagates() {
        let transport = Arc::new(MockTransport::default());
        let client = ToggleClient::new(transport);

        let err = client.is_enabled("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_mirror_entry() {
        let transport = Arc::new(MockTransport::with_toggle("dark-mode", false));
        let client = ToggleClient::new(transport.clone());

        assert!(!client.is_enabled("dark-mode").await.unwrap());
        client.delete("dark-mode").await.unwrap();

        // Entry gone: next is_enabled goes remote and fails not-found.
        let err = client.is_enabled("dark-mode").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_breaker_trips_on_server_errors_only() {
        let transport = Arc::new(MockTransport::with_toggle("dark-mode", false));
        let breaker = Arc::new(ThresholdBreaker::new(BreakerConfig {
            failure_threshold: 3,
            success_threshold: 1,
            cooldown: std::time::Duration::from_secs(60),
        }));
        let client = ToggleClient::with_breaker(transport.clone(), breaker);

        // Not-found responses never contribute to the threshold.
        for _ in 0..5 {
            let err = client.get("missing").await.unwrap_err();
            assert!(err.is_not_found());
        }
        assert_eq!(client.breaker_state(), BreakerState::Closed);

        // Unavailable responses do.
        transport.set_fail_with(Some(Code::Unavailable));
        for _ in 0..3 {
            assert!(client.get("dark-mode").await.is_err());
        }
        assert_eq!(client.breaker_state(), BreakerState::Open);

        // Open breaker rejects without calling the transport.
        let before = transport.calls();
        let err = client.get("dark-mode").await.unwrap_err();
        assert!(err.is_circuit_open());
        assert_eq!(transport.calls(), before);
    }

    #[tokio::test]
    async fn test_subscribe_converges_mirror() {
        let transport = Arc::new(MockTransport::default());
        let client = ToggleClient::new(transport.clone());

        let subscriber = Arc::new(ReplaySubscriber {
            events: vec![
                ToggleEvent::enabled(Toggle::new("dark-mode", "")),
                ToggleEvent::enabled(Toggle::new("unwatched", "")),
            ],
        });
        client
            .subscribe(subscriber, vec!["dark-mode".to_string()])
            .await
            .unwrap();

        // Mirror converged without any RPC.
        assert!(client.is_enabled("dark-mode").await.unwrap());
        assert_eq!(transport.calls(), 0);
    }
}
