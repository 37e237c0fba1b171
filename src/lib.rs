//! Switchboard - feature-toggle service.
//!
//! Create, enable, disable, delete, and query named boolean flags used to
//! gate behavior in other systems. The core is the toggle consistency
//! subsystem: cache-aside repositories keeping PostgreSQL and Redis
//! coherent, a best-effort event pipeline announcing state changes, and a
//! client-side mirror (`switchboard-client`) kept eventually consistent in
//! consumer processes.
//!
//! Consistency comes from the fixed write order (store, then cache, then
//! event) plus tolerant, idempotent read paths; there are no distributed
//! locks. The store is always authoritative.

pub mod bus;
pub mod config;
pub mod error;
pub mod grpc;
pub mod interfaces;
pub mod repository;
pub mod service;
pub mod standalone;
pub mod storage;
pub mod telemetry;
pub mod test_utils;
pub mod validation;

pub use error::{Result, ToggleError};
pub use switchboard_client::{Toggle, ToggleEvent, ToggleEventName};
