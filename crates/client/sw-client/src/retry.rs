//! Retry bookkeeping for enrichment requests.
//!
//! A [`RetryState`] lives for one lookup. Network failures, HTTP 500s,
//! undecodable bodies and rate-limit responses all draw from the same
//! budget, so a lookup makes at most `max_retries + 1` attempts even when
//! the service keeps answering 429.

use reqwest::header::HeaderValue;
use std::time::Duration;

/// Default retry budget per lookup.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Per-lookup retry counter and accumulated backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    max_retries: u32,
    retries_used: u32,
    attempts: u32,
    slept: Duration,
}

impl RetryState {
    /// Create a fresh state with the given budget.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retries_used: 0,
            attempts: 0,
            slept: Duration::ZERO,
        }
    }

    /// Count a new attempt and return its 1-based number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Take one retry from the budget.
    ///
    /// Returns false once the budget is spent; the caller must stop.
    pub fn consume(&mut self) -> bool {
        if self.retries_used < self.max_retries {
            self.retries_used += 1;
            true
        } else {
            false
        }
    }

    /// Add a rate-limit backoff to the running total.
    pub fn record_sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retries_used(&self) -> u32 {
        self.retries_used
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Total time spent sleeping on `Retry-After`.
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

/// Parse a `Retry-After` header given in whole seconds.
///
/// HTTP-date values are not used by the enrichment service and are rejected.
pub fn parse_retry_after(value: &HeaderValue) -> Option<Duration> {
    let secs: u64 = value.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(secs))
}
