//! Event bus implementations.
//!
//! Publishing announces committed mutations; subscribing drains the channel
//! into a handler. Delivery is at-least-once and best-effort: a lost event
//! only delays mirror freshness, it never corrupts state.

#[cfg(feature = "channel")]
pub mod channel;

#[cfg(feature = "kafka")]
pub mod kafka;

#[cfg(feature = "channel")]
pub use channel::ChannelToggleBus;

#[cfg(feature = "kafka")]
pub use kafka::{KafkaTogglePublisher, KafkaToggleSubscriber};
