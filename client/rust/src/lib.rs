//! Switchboard client library.
//!
//! Shared toggle types, the transport and subscriber interfaces, the circuit
//! breaker, and [`ToggleClient`]: a remote-facing client that keeps a local,
//! eventually-consistent mirror of toggle state.
//!
//! The mirror is owned per client instance and fed two ways: optimistic
//! writes on successful mutations (read-your-writes for the calling
//! process), and a subscription loop draining toggle events from the message
//! channel. `is_enabled` reads the mirror and falls back to a remote `get`
//! on miss.

pub mod breaker;
pub mod client;
pub mod error;
pub mod mirror;
pub mod traits;
pub mod types;

pub use breaker::{
    is_breaker_relevant, BreakerConfig, BreakerState, CircuitBreaker, NoopBreaker,
    ThresholdBreaker,
};
pub use client::ToggleClient;
pub use error::{ClientError, Result};
pub use mirror::ToggleMirror;
pub use traits::{EventHandler, EventSubscriber, HandlerError, SubscribeError, ToggleTransport};
pub use types::{Toggle, ToggleEvent, ToggleEventName};
