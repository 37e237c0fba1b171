use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use switchboard_client::{HandlerError, Toggle};
use tokio::sync::Mutex;

use super::*;

/// Handler that counts invocations and records event keys.
#[derive(Default)]
struct CountingHandler {
    count: Arc<AtomicUsize>,
    keys: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl CountingHandler {
    fn new() -> Self {
        Self::default()
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl EventHandler for CountingHandler {
    async fn handle(&self, event: ToggleEvent) -> Result<(), HandlerError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.keys.lock().await.push(event.toggle.key.clone());
        if self.fail {
            return Err("handler failure".into());
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_publish_with_no_receivers_succeeds() {
    let bus = ChannelToggleBus::new();
    let event = ToggleEvent::created(Toggle::new("dark-mode", ""));

    assert!(bus.publish(&event).await.is_ok());
}

#[tokio::test]
async fn test_subscribe_receives_published_events() {
    let bus = ChannelToggleBus::new();

    let handler = CountingHandler::new();
    let count = handler.count.clone();
    let keys = handler.keys.clone();

    let subscriber = bus.clone();
    let drain = tokio::spawn(async move { subscriber.subscribe(Box::new(handler)).await });

    // Give the drain loop time to attach.
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    bus.publish(&ToggleEvent::enabled(Toggle::new("dark-mode", "")))
        .await
        .unwrap();
    bus.publish(&ToggleEvent::disabled(Toggle::new("beta-banner", "")))
        .await
        .unwrap();

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(
        *keys.lock().await,
        vec!["dark-mode".to_string(), "beta-banner".to_string()]
    );

    bus.stop();
    drain.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_handler_failure_does_not_stop_consumption() {
    let bus = ChannelToggleBus::new();

    let handler = CountingHandler::failing();
    let count = handler.count.clone();

    let subscriber = bus.clone();
    let drain = tokio::spawn(async move { subscriber.subscribe(Box::new(handler)).await });

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    for _ in 0..3 {
        bus.publish(&ToggleEvent::enabled(Toggle::new("dark-mode", "")))
            .await
            .unwrap();
    }

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    // All three messages were handled despite each handler call failing.
    assert_eq!(count.load(Ordering::SeqCst), 3);

    bus.stop();
    drain.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_stop_ends_drain_loop() {
    let bus = ChannelToggleBus::new();

    let subscriber = bus.clone();
    let drain =
        tokio::spawn(async move { subscriber.subscribe(Box::new(CountingHandler::new())).await });

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    bus.stop();

    let result = tokio::time::timeout(tokio::time::Duration::from_secs(1), drain)
        .await
        .expect("drain loop did not stop");
    result.unwrap().unwrap();
}
