use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use redis::{AsyncCommands, Client as RedisClient};

use crate::{entities::rate_limit::RateLimitRecord, errors::StoreError};

/// Narrow key-value seam for rate-limit counters: a get and a put-with-TTL.
/// Any backing store with per-key expiry satisfies it.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, StoreError>;
    async fn put(
        &self,
        key: &str,
        record: &RateLimitRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError>;
}

pub struct RedisRateLimitStore {
    client: RedisClient,
}

impl RedisRateLimitStore {
    pub fn new(client: RedisClient) -> Self {
        RedisRateLimitStore { client }
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, StoreError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        raw.map(|payload| serde_json::from_str(&payload))
            .transpose()
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn put(
        &self,
        key: &str,
        record: &RateLimitRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let payload =
            serde_json::to_string(record).map_err(|e| StoreError::Decode(e.to_string()))?;

        let _: () = conn
            .set_ex(key, payload, ttl_secs)
            .await
            .map_err(|e| StoreError::Operation(e.to_string()))?;

        Ok(())
    }
}

struct MemoryEntry {
    record: RateLimitRecord,
    expires_at_ms: i64,
}

/// DashMap-backed store honoring per-key TTL. Used by tests and available
/// as a single-process fallback.
#[derive(Default)]
pub struct MemoryRateLimitStore {
    entries: DashMap<String, MemoryEntry>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, StoreError> {
        let now_ms = Utc::now().timestamp_millis();
        if let Some(entry) = self.entries.get(key) {
            if now_ms < entry.expires_at_ms {
                return Ok(Some(entry.record));
            }
        }
        self.entries.remove_if(key, |_, entry| now_ms >= entry.expires_at_ms);
        Ok(None)
    }

    async fn put(
        &self,
        key: &str,
        record: &RateLimitRecord,
        ttl_secs: u64,
    ) -> Result<(), StoreError> {
        let expires_at_ms = Utc::now().timestamp_millis() + (ttl_secs as i64) * 1000;
        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                record: *record,
                expires_at_ms,
            },
        );
        Ok(())
    }
}
