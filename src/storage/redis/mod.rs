//! Redis snapshot cache.

mod toggle_cache;

pub use toggle_cache::RedisToggleCache;
