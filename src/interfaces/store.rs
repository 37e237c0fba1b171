//! Durable store interface.

use async_trait::async_trait;
use switchboard_client::Toggle;

use crate::error::Result;

/// Default bound for unqualified scans.
pub const DEFAULT_GET_ALL_LIMIT: u32 = 10;

/// Interface for the system of record.
///
/// Implementations:
/// - `PostgresToggleStore`: PostgreSQL storage
/// - `MockToggleStore`: in-memory storage for tests
#[async_trait]
pub trait ToggleStore: Send + Sync {
    /// Insert a new toggle.
    ///
    /// Returns `AlreadyExists` if the key is taken; the store's uniqueness
    /// constraint is the arbiter, not an application-level check.
    async fn insert(&self, toggle: &Toggle) -> Result<Toggle>;

    /// Fetch a toggle by key. Returns `NotFound` when no row matches.
    async fn get_by_key(&self, key: &str) -> Result<Toggle>;

    /// Fetch up to `limit` toggles. No rows is success, not an error.
    async fn get_all(&self, limit: u32) -> Result<Vec<Toggle>>;

    /// Set the toggle's flag.
    ///
    /// Confirms existence first and returns `NotFound` rather than silently
    /// no-op-ing, so enable/disable can surface it to the requester.
    async fn update_is_enabled(&self, key: &str, value: bool) -> Result<()>;

    /// Delete a toggle. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
