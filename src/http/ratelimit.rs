use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Method;

pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Current time on the tracker's clock, epoch seconds.
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Key identifying one rate-limit bucket. Two requests share a bucket iff
/// their method and route are identical.
pub fn route_key(method: &Method, route: &str) -> String {
    format!("{}/{}", method, route)
}

/// Per-route rate-limit state as last reported by the server.
///
/// Informational only: throttling decisions are driven by status 429, not
/// by consulting `remaining` before a send. The server stays authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRecord {
    /// Calls the server said were left in the bucket. `None` until the
    /// first response for this route has been seen.
    pub remaining: Option<i64>,
    /// Epoch seconds after which `remaining` is no longer meaningful and
    /// the bucket counts as fresh.
    pub expires_at: i64,
}

impl RateLimitRecord {
    fn fresh(now: i64) -> Self {
        Self {
            remaining: None,
            expires_at: now,
        }
    }

    /// Whether the server reported the bucket empty and the report has not
    /// expired yet.
    pub fn is_exhausted(&self, now: i64) -> bool {
        self.remaining == Some(0) && self.expires_at > now
    }
}

/// Passive store of per-route rate-limit records.
///
/// Buckets are created lazily on first use and live for the process
/// lifetime; the key space is bounded by the fixed endpoint set, so there
/// is no eviction. The lock is only ever held between suspension points.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    buckets: Mutex<HashMap<String, RateLimitRecord>>,
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `key`, creating a fresh one if absent.
    /// Never blocks, never fails.
    pub fn acquire(&self, key: &str, now: i64) -> RateLimitRecord {
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        *buckets
            .entry(key.to_string())
            .or_insert_with(|| RateLimitRecord::fresh(now))
    }

    /// Fold the response headers for `key` into its record.
    ///
    /// Runs after every transport call, success or failure; rate-limit
    /// headers may accompany any status code. Values are assigned, never
    /// accumulated: the server's header is the authoritative count at
    /// response time.
    pub fn update(&self, key: &str, headers: &HeaderMap, now: i64) {
        let remaining = match headers.get(REMAINING_HEADER) {
            // Unparseable counts collapse to 0: re-check before trusting
            // the bucket again.
            Some(v) => v
                .to_str()
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(0),
            // No figure reported; assume a single use is left.
            None => 1,
        };

        let expires_at = if let Some(v) = headers.get(RETRY_AFTER) {
            let after = v
                .to_str()
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(1);
            now + after.max(1)
        } else if let Some(v) = headers.get(RESET_HEADER) {
            let reset = v
                .to_str()
                .ok()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(now);
            // Never move the reset into the past.
            reset.max(now)
        } else {
            now
        };

        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let record = buckets
            .entry(key.to_string())
            .or_insert_with(|| RateLimitRecord::fresh(now));
        record.remaining = Some(remaining);
        record.expires_at = expires_at;
    }
}
