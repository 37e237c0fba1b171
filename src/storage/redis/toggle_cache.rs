//! Redis ToggleCache implementation.
//!
//! Each toggle is one hash keyed by toggle key, holding the fixed field set
//! and expiring after the configured TTL. HGETALL on an absent key yields an
//! empty hash, which is the miss signal; an adapter failure is an error.
//! Writing fewer fields than the fixed set is a hard error since a partial
//! entry would fail to deserialize on a later read.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::collections::HashMap;
use switchboard_client::Toggle;
use tracing::{debug, info};

use crate::error::{Result, ToggleError};
use crate::interfaces::ToggleCache;

/// The fixed field set written for every cached toggle.
const TOGGLE_FIELDS: [&str; 5] = ["key", "is_enabled", "description", "created_at", "updated_at"];

/// Redis toggle cache.
pub struct RedisToggleCache {
    conn: ConnectionManager,
    ttl: Duration,
}

impl RedisToggleCache {
    /// Connect to Redis.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL (e.g., redis://localhost:6379)
    /// * `ttl` - Expiration applied to every cached entry
    pub async fn new(url: &str, ttl: Duration) -> Result<Self> {
        let client = Client::open(url).map_err(ToggleError::unavailable)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(ToggleError::unavailable)?;

        info!(url = %url, ttl_secs = ttl.as_secs(), "Connected to Redis");

        Ok(Self { conn, ttl })
    }

    /// Build a cache over an existing connection (shared across adapters).
    pub fn from_connection(conn: ConnectionManager, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    fn hash_from_toggle(toggle: &Toggle) -> Vec<(&'static str, String)> {
        vec![
            ("key", toggle.key.clone()),
            ("is_enabled", toggle.is_enabled.to_string()),
            ("description", toggle.description.clone()),
            ("created_at", toggle.created_at.to_rfc3339()),
            ("updated_at", toggle.updated_at.to_rfc3339()),
        ]
    }

    fn toggle_from_hash(hash: &HashMap<String, String>) -> Result<Toggle> {
        let field = |name: &str| -> Result<&String> {
            hash.get(name)
                .ok_or_else(|| ToggleError::internal(format!("cache entry missing field {name}")))
        };

        let is_enabled: bool = field("is_enabled")?
            .parse()
            .map_err(ToggleError::internal)?;
        let created_at = DateTime::parse_from_rfc3339(field("created_at")?)
            .map_err(ToggleError::internal)?
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(field("updated_at")?)
            .map_err(ToggleError::internal)?
            .with_timezone(&Utc);

        Ok(Toggle {
            key: field("key")?.clone(),
            is_enabled,
            description: field("description")?.clone(),
            created_at,
            updated_at,
        })
    }
}

#[async_trait]
impl ToggleCache for RedisToggleCache {
    async fn get(&self, key: &str) -> Result<Option<Toggle>> {
        let mut conn = self.conn.clone();

        let hash: HashMap<String, String> = conn.hgetall(key).await?;
        if hash.is_empty() {
            return Ok(None);
        }

        Self::toggle_from_hash(&hash).map(Some)
    }

    async fn set(&self, toggle: &Toggle) -> Result<()> {
        let fields = Self::hash_from_toggle(toggle);
        let mut conn = self.conn.clone();

        let (added, _expire_set): (u64, bool) = redis::pipe()
            .hset_multiple(&toggle.key, &fields)
            .expire(&toggle.key, self.ttl.as_secs() as i64)
            .query_async(&mut conn)
            .await?;

        if added != TOGGLE_FIELDS.len() as u64 {
            return Err(ToggleError::internal(format!(
                "only wrote {added} out of {} cache fields",
                TOGGLE_FIELDS.len()
            )));
        }

        debug!(key = %toggle.key, "cached toggle");
        Ok(())
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();

        // Only touch entries that exist: a lone field written into an absent
        // key would materialize a TTL-less partial hash that poisons later
        // reads.
        let exists: bool = conn.exists(key).await?;
        if !exists {
            return Ok(());
        }

        let _: () = conn.hset(key, field, value).await?;

        debug!(key = %key, field = %field, "updated cache field");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }
}
