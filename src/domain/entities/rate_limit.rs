use serde::{Deserialize, Serialize};

/// Per-IP counter stored under `rate_limit:<ip>` with a store-native TTL.
/// Serialized as `{"count": n, "resetAt": ms}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRecord {
    pub count: u32,
    /// Epoch milliseconds at which the current window ends.
    pub reset_at: i64,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
}
