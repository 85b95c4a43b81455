//! Statistics for enrichment runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use sw_error::ErrorCategory;

/// Counters collected while enriching records.
#[derive(Debug)]
pub struct EnrichStats {
    /// When processing started
    started_at: DateTime<Utc>,

    /// Records handed to the enricher
    records_seen: AtomicU64,

    /// Records merged with a successful lookup
    records_enriched: AtomicU64,

    /// Records merged with a failure record
    records_failed: AtomicU64,

    /// Records passed through without a lookup
    records_skipped: AtomicU64,

    /// Failed lookups that may succeed on a later run
    transient_errors: AtomicU64,

    /// Failed lookups that will not succeed on retry
    permanent_errors: AtomicU64,
}

impl Default for EnrichStats {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            records_seen: AtomicU64::new(0),
            records_enriched: AtomicU64::new(0),
            records_failed: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            transient_errors: AtomicU64::new(0),
            permanent_errors: AtomicU64::new(0),
        }
    }

    pub fn record_seen(&self) {
        self.records_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_enriched(&self) {
        self.records_enriched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.records_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a record whose lookup failed.
    pub fn record_failed(&self, category: ErrorCategory) {
        self.records_failed.fetch_add(1, Ordering::Relaxed);
        match category {
            ErrorCategory::Transient => self.transient_errors.fetch_add(1, Ordering::Relaxed),
            ErrorCategory::Permanent => self.permanent_errors.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn records_seen(&self) -> u64 {
        self.records_seen.load(Ordering::Relaxed)
    }

    pub fn records_enriched(&self) -> u64 {
        self.records_enriched.load(Ordering::Relaxed)
    }

    pub fn records_failed(&self) -> u64 {
        self.records_failed.load(Ordering::Relaxed)
    }

    pub fn records_skipped(&self) -> u64 {
        self.records_skipped.load(Ordering::Relaxed)
    }

    /// Take a point-in-time copy, stamped with the current time as completion.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            started_at: self.started_at,
            completed_at: Utc::now(),
            records_seen: self.records_seen(),
            records_enriched: self.records_enriched(),
            records_failed: self.records_failed(),
            records_skipped: self.records_skipped(),
            transient_errors: self.transient_errors.load(Ordering::Relaxed),
            permanent_errors: self.permanent_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`EnrichStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub records_seen: u64,
    pub records_enriched: u64,
    pub records_failed: u64,
    pub records_skipped: u64,
    pub transient_errors: u64,
    pub permanent_errors: u64,
}

impl StatsSnapshot {
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    /// Records per second over the run, if any time has elapsed.
    pub fn records_per_second(&self) -> Option<f64> {
        let secs = self.duration().num_milliseconds() as f64 / 1000.0;
        (secs > 0.0).then(|| self.records_seen as f64 / secs)
    }
}
