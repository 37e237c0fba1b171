//! Toggle service layer.
//!
//! One capability trait per operation with one implementation each. Services
//! validate input, drive the repositories, and announce committed mutations
//! on the event bus. Publish failure is logged and swallowed in every
//! service: the mutation has already committed, so a lost event only delays
//! mirror freshness.

mod creator;
mod decorator;
mod deleter;
mod disabler;
mod enabler;
mod getter;

pub use creator::ToggleCreator;
pub use decorator::Tracing;
pub use deleter::ToggleDeleter;
pub use disabler::ToggleDisabler;
pub use enabler::ToggleEnabler;
pub use getter::ToggleGetter;

use async_trait::async_trait;
use switchboard_client::Toggle;

use crate::error::Result;

/// Create a toggle.
#[async_trait]
pub trait CreateToggle: Send + Sync {
    /// Create a new toggle and store it.
    ///
    /// The key is normalized (trimmed, lowercased) and validated before any
    /// adapter is touched; duplicates are rejected with `AlreadyExists`.
    async fn create(&self, key: &str, description: &str) -> Result<()>;
}

/// Query toggles.
#[async_trait]
pub trait GetToggle: Send + Sync {
    /// Fetch a single toggle by key. `NotFound` when absent.
    async fn get_by_key(&self, key: &str) -> Result<Toggle>;

    /// Fetch all toggles, bounded by the default page size.
    async fn get_all(&self) -> Result<Vec<Toggle>>;
}

/// Enable a toggle.
#[async_trait]
pub trait EnableToggle: Send + Sync {
    /// Set the toggle's flag to true. `NotFound` when absent.
    async fn enable(&self, key: &str) -> Result<()>;
}

/// Disable a toggle.
#[async_trait]
pub trait DisableToggle: Send + Sync {
    /// Set the toggle's flag to false. `NotFound` when absent.
    async fn disable(&self, key: &str) -> Result<()>;
}

/// Delete a toggle.
#[async_trait]
pub trait DeleteToggle: Send + Sync {
    /// Delete a toggle by key.
    ///
    /// Fails with `ProhibitedToDelete` while the toggle is enabled and
    /// `NotFound` when absent.
    async fn delete_by_key(&self, key: &str) -> Result<()>;
}
