//! Storage adapter implementations.

#[cfg(feature = "postgres")]
pub mod schema;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "postgres")]
pub use postgres::PostgresToggleStore;

#[cfg(feature = "redis")]
pub use redis::RedisToggleCache;

#[cfg(feature = "postgres")]
use sqlx::postgres::PgPoolOptions;
#[cfg(any(feature = "postgres", feature = "redis"))]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use tracing::info;

#[cfg(any(feature = "postgres", feature = "redis"))]
use crate::config::Config;
#[cfg(any(feature = "postgres", feature = "redis"))]
use crate::error::Result;
#[cfg(feature = "postgres")]
use crate::error::ToggleError;

/// Connect to PostgreSQL and prepare the schema.
///
/// The returned store wraps a pooled connection shared by every repository
/// in the process.
#[cfg(feature = "postgres")]
pub async fn init_postgres(config: &Config) -> Result<Arc<PostgresToggleStore>> {
    let pool = PgPoolOptions::new()
        .max_connections(config.postgres.max_open_conns)
        .connect(&config.postgres.url())
        .await
        .map_err(ToggleError::unavailable)?;

    info!(
        host = %config.postgres.host,
        database = %config.postgres.name,
        "Connected to PostgreSQL"
    );

    let store = PostgresToggleStore::new(pool);
    store.init().await?;
    Ok(Arc::new(store))
}

/// Connect to Redis with the configured entry TTL.
#[cfg(feature = "redis")]
pub async fn init_redis(config: &Config) -> Result<Arc<RedisToggleCache>> {
    let cache = RedisToggleCache::new(&config.redis.url(), config.redis.ttl()).await?;
    Ok(Arc::new(cache))
}
