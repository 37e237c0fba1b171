//! Cache-aside repositories.
//!
//! One composite per operation family, each combining the durable store and
//! the cache with a fixed, non-configurable consistency policy:
//!
//! - the store is authoritative and its errors always propagate;
//! - cache writes on the insert/update paths are best-effort (logged, never
//!   returned) since a later read repopulates the cache;
//! - a cache *error* on the read path propagates; a miss does not;
//! - cache invalidation failure on the delete path propagates, so a deleted
//!   key can never survive in cache while gone from the store.

mod deleter;
mod getter;
mod inserter;
mod updater;

pub use deleter::ToggleDeleter;
pub use getter::ToggleGetter;
pub use inserter::ToggleInserter;
pub use updater::ToggleUpdater;
