//! Kafka event bus.
//!
//! Toggle events are JSON-encoded onto a single configured topic, keyed by
//! toggle key so per-key ordering follows partition assignment. Subscribers
//! join a consumer group and commit offsets asynchronously after handling.
//! An undecodable message is logged and committed anyway so it is never
//! reprocessed; a handler error is logged and consumption continues.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use switchboard_client::{EventHandler, EventSubscriber, SubscribeError, ToggleEvent};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::KafkaConfig;
use crate::interfaces::{BusError, TogglePublisher};

/// Producer-side delivery timeout.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka toggle event publisher.
pub struct KafkaTogglePublisher {
    producer: FutureProducer,
    topic: String,
}

impl KafkaTogglePublisher {
    /// Create a publisher for the configured topic.
    pub fn new(config: &KafkaConfig) -> Result<Self, BusError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.address)
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .create()
            .map_err(|e| BusError::Connection(format!("failed to create Kafka producer: {e}")))?;

        info!(
            bootstrap_servers = %config.address,
            topic = %config.topic,
            "Connected to Kafka"
        );

        Ok(Self {
            producer,
            topic: config.topic.clone(),
        })
    }
}

#[async_trait]
impl TogglePublisher for KafkaTogglePublisher {
    async fn publish(&self, event: &ToggleEvent) -> Result<(), BusError> {
        let payload = serde_json::to_vec(event)?;
        let record = FutureRecord::to(&self.topic)
            .key(&event.toggle.key)
            .payload(&payload);

        self.producer
            .send(record, SEND_TIMEOUT)
            .await
            .map_err(|(e, _)| BusError::Publish(format!("failed to publish: {e}")))?;

        debug!(topic = %self.topic, key = %event.toggle.key, "published toggle event to Kafka");
        Ok(())
    }
}

/// Kafka toggle event subscriber.
pub struct KafkaToggleSubscriber {
    consumer: StreamConsumer,
    topic: String,
    cancel: watch::Sender<bool>,
}

impl KafkaToggleSubscriber {
    /// Create a subscriber in the configured consumer group.
    pub fn new(config: &KafkaConfig) -> Result<Self, BusError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.address)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()
            .map_err(|e| BusError::Connection(format!("failed to create Kafka consumer: {e}")))?;

        let (cancel, _) = watch::channel(false);

        Ok(Self {
            consumer,
            topic: config.topic.clone(),
            cancel,
        })
    }

    /// Ask the drain loop to stop after the in-flight message.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }
}

#[async_trait]
impl EventSubscriber for KafkaToggleSubscriber {
    async fn subscribe(&self, handler: Box<dyn EventHandler>) -> Result<(), SubscribeError> {
        self.consumer
            .subscribe(&[self.topic.as_str()])
            .map_err(|e| SubscribeError::Channel(format!("failed to subscribe to topic: {e}")))?;

        info!(topic = %self.topic, "subscribed to Kafka topic");

        let mut cancel = self.cancel.subscribe();
        let mut stream = self.consumer.stream();

        loop {
            tokio::select! {
                message = stream.next() => match message {
                    Some(Ok(message)) => {
                        let payload = match message.payload() {
                            Some(p) => p,
                            None => {
                                warn!("received message with no payload");
                                continue;
                            }
                        };

                        match serde_json::from_slice::<ToggleEvent>(payload) {
                            Ok(event) => {
                                debug!(
                                    topic = %message.topic(),
                                    partition = message.partition(),
                                    offset = message.offset(),
                                    key = %event.toggle.key,
                                    "received toggle event"
                                );

                                if let Err(e) = handler.handle(event).await {
                                    warn!(error = %e, "event handler failed, continuing");
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "failed to decode toggle event, skipping");
                            }
                        }

                        // Commit either way so a bad message is never replayed.
                        if let Err(e) = self.consumer.commit_message(&message, CommitMode::Async) {
                            error!(error = %e, "failed to commit offset");
                        }
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "Kafka consumer error");
                    }
                    None => {
                        return Err(SubscribeError::Channel(
                            "Kafka message stream ended".to_string(),
                        ));
                    }
                },
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Kafka subscriber stopped");
                        return Ok(());
                    }
                }
            }
        }
    }
}
