//! Interfaces between the consistency core and its adapters.
//!
//! The durable store is the source of truth; the cache holds denormalized
//! snapshots; the event bus announces state changes. Repositories compose
//! these behind a fixed consistency policy.

mod cache;
mod event_bus;
mod store;

pub use cache::ToggleCache;
pub use event_bus::{BusError, TogglePublisher};
pub use store::{ToggleStore, DEFAULT_GET_ALL_LIMIT};
