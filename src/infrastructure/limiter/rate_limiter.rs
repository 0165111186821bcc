use chrono::Utc;

use crate::{
    entities::rate_limit::{RateLimitDecision, RateLimitRecord},
    errors::StoreError,
    limiter::store::RateLimitStore,
};

pub const RATE_LIMIT_WINDOW_MS: i64 = 60 * 60 * 1000;
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 5;

const KEY_PREFIX: &str = "rate_limit:";

/// Counter-with-expiry check for one client IP.
///
/// With no store configured the limiter is disabled and every request is
/// allowed. Store failures are logged and fail open: availability is
/// preferred over strict limiting because this is an abuse deterrent, not a
/// security boundary. There is no read-modify-write atomicity across
/// concurrent requests from one IP; the count is best-effort.
pub async fn check_rate_limit(
    ip: &str,
    store: Option<&dyn RateLimitStore>,
) -> RateLimitDecision {
    check_rate_limit_at(ip, store, Utc::now().timestamp_millis()).await
}

/// Same as [`check_rate_limit`] with an explicit clock, so window expiry is
/// testable without waiting an hour.
pub async fn check_rate_limit_at(
    ip: &str,
    store: Option<&dyn RateLimitStore>,
    now_ms: i64,
) -> RateLimitDecision {
    let Some(store) = store else {
        return RateLimitDecision {
            allowed: true,
            remaining: RATE_LIMIT_MAX_REQUESTS,
        };
    };

    let key = format!("{KEY_PREFIX}{ip}");
    match evaluate(store, &key, now_ms).await {
        Ok(decision) => decision,
        Err(e) => {
            tracing::error!("Rate limit check failed: {}", e);
            RateLimitDecision {
                allowed: true,
                remaining: RATE_LIMIT_MAX_REQUESTS,
            }
        }
    }
}

async fn evaluate(
    store: &dyn RateLimitStore,
    key: &str,
    now_ms: i64,
) -> Result<RateLimitDecision, StoreError> {
    let fresh = RateLimitRecord {
        count: 1,
        reset_at: now_ms + RATE_LIMIT_WINDOW_MS,
    };

    let Some(record) = store.get(key).await? else {
        // First request from this IP
        store.put(key, &fresh, (RATE_LIMIT_WINDOW_MS / 1000) as u64).await?;
        return Ok(RateLimitDecision {
            allowed: true,
            remaining: RATE_LIMIT_MAX_REQUESTS - 1,
        });
    };

    if now_ms > record.reset_at {
        // Window expired, reset
        store.put(key, &fresh, (RATE_LIMIT_WINDOW_MS / 1000) as u64).await?;
        return Ok(RateLimitDecision {
            allowed: true,
            remaining: RATE_LIMIT_MAX_REQUESTS - 1,
        });
    }

    if record.count >= RATE_LIMIT_MAX_REQUESTS {
        return Ok(RateLimitDecision {
            allowed: false,
            remaining: 0,
        });
    }

    let bumped = RateLimitRecord {
        count: record.count + 1,
        reset_at: record.reset_at,
    };
    let remaining_ttl_secs = ((record.reset_at - now_ms) / 1000).max(0) as u64;
    store.put(key, &bumped, remaining_ttl_secs).await?;

    Ok(RateLimitDecision {
        allowed: true,
        remaining: RATE_LIMIT_MAX_REQUESTS - record.count - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limiter::store::MemoryRateLimitStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl RateLimitStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<RateLimitRecord>, StoreError> {
            Err(StoreError::Connection("connection refused".to_string()))
        }

        async fn put(
            &self,
            _key: &str,
            _record: &RateLimitRecord,
            _ttl_secs: u64,
        ) -> Result<(), StoreError> {
            Err(StoreError::Connection("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn disabled_limiter_allows_everything() {
        let decision = check_rate_limit("1.2.3.4", None).await;
        assert_eq!(
            decision,
            RateLimitDecision {
                allowed: true,
                remaining: RATE_LIMIT_MAX_REQUESTS
            }
        );
    }

    #[tokio::test]
    async fn five_requests_pass_then_sixth_is_denied() {
        let store = MemoryRateLimitStore::new();
        let now = 1_700_000_000_000;

        for expected_remaining in (0..RATE_LIMIT_MAX_REQUESTS).rev() {
            let decision = check_rate_limit_at("1.2.3.4", Some(&store), now).await;
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
        }

        let decision = check_rate_limit_at("1.2.3.4", Some(&store), now).await;
        assert_eq!(
            decision,
            RateLimitDecision {
                allowed: false,
                remaining: 0
            }
        );
    }

    #[tokio::test]
    async fn window_expiry_resets_the_counter() {
        let store = MemoryRateLimitStore::new();
        let now = 1_700_000_000_000;

        for _ in 0..RATE_LIMIT_MAX_REQUESTS {
            check_rate_limit_at("1.2.3.4", Some(&store), now).await;
        }
        assert!(!check_rate_limit_at("1.2.3.4", Some(&store), now).await.allowed);

        let later = now + RATE_LIMIT_WINDOW_MS + 1;
        let decision = check_rate_limit_at("1.2.3.4", Some(&store), later).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, RATE_LIMIT_MAX_REQUESTS - 1);
    }

    #[tokio::test]
    async fn distinct_ips_have_independent_windows() {
        let store = MemoryRateLimitStore::new();
        let now = 1_700_000_000_000;

        for _ in 0..RATE_LIMIT_MAX_REQUESTS {
            check_rate_limit_at("1.2.3.4", Some(&store), now).await;
        }
        assert!(!check_rate_limit_at("1.2.3.4", Some(&store), now).await.allowed);

        let decision = check_rate_limit_at("5.6.7.8", Some(&store), now).await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, RATE_LIMIT_MAX_REQUESTS - 1);
    }

    #[tokio::test]
    async fn store_failure_fails_open() {
        let decision = check_rate_limit_at("1.2.3.4", Some(&BrokenStore), 0).await;
        assert_eq!(
            decision,
            RateLimitDecision {
                allowed: true,
                remaining: RATE_LIMIT_MAX_REQUESTS
            }
        );
    }
}
