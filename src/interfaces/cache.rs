//! Cache interface.

use async_trait::async_trait;
use switchboard_client::Toggle;

use crate::error::Result;

/// Interface for the toggle snapshot cache.
///
/// The cache is never the source of truth: entries may be absent, stale
/// within TTL, or evicted at any time; the worst case is one extra store
/// read. Callers must distinguish a miss (`Ok(None)`) from an adapter error
/// (`Err`); the two have different propagation policies.
#[async_trait]
pub trait ToggleCache: Send + Sync {
    /// Fetch a cached snapshot.
    ///
    /// `Ok(None)` is a miss; `Err` means the adapter itself failed.
    async fn get(&self, key: &str) -> Result<Option<Toggle>>;

    /// Store a full snapshot with the configured expiration.
    ///
    /// A partial field write is a hard error: a half-written entry would
    /// deserialize with garbage fields on a later read.
    async fn set(&self, toggle: &Toggle) -> Result<()>;

    /// Overwrite a single field of an existing entry (enable/disable fast
    /// path). Absent entries are left absent.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<()>;

    /// Drop an entry. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
