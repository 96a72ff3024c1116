//! Client-side Quota Tracking
//!
//! Keeps a rolling log of request timestamps (epoch milliseconds) in
//! durable storage and derives usage statistics from it on demand.
//! Raw timestamps are stored rather than counters, so the trailing window
//! has no boundary bias.
//!
//! Bookkeeping is best-effort: storage failures are logged and swallowed,
//! never surfaced to the request path.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

mod store;

pub use store::{FileStore, MemoryStore, QuotaStore};

/// Storage key holding the serialized log
pub const QUOTA_KEY: &str = "chiko_quota_tracker";

/// Trailing window used for the per-minute figure
pub const MINUTE_WINDOW_MS: i64 = 60 * 1000;

/// Retention window; older entries are pruned on every write
pub const RETENTION_MS: i64 = 24 * 60 * 60 * 1000;

// ============================================================================
// Types
// ============================================================================

/// Configured limits (free tier estimates by default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaLimits {
    /// Requests per minute
    pub per_minute: u32,
    /// Requests per day
    pub per_day: u32,
    /// Remaining-capacity threshold at or below which usage is "low"
    pub low_threshold: u32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            per_minute: 15,
            per_day: 1500,
            low_threshold: 3,
        }
    }
}

/// Usage snapshot derived from the log at read time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStats {
    /// Requests within the trailing 60 seconds
    pub used_per_minute: u32,
    /// Configured per-minute limit
    pub limit: u32,
    /// `max(0, limit - used_per_minute)`
    pub remaining: u32,
    /// `min(100, 100 * used_per_minute / limit)`
    pub percent_used: f64,
    /// `remaining <= low_threshold`
    pub is_low: bool,
    /// Requests within the trailing 24 hours
    pub used_today: u32,
    /// Configured per-day limit
    pub daily_limit: u32,
    /// `max(0, daily_limit - used_today)`
    pub daily_remaining: u32,
}

impl QuotaStats {
    fn compute(log: &[i64], now_ms: i64, limits: &QuotaLimits) -> Self {
        let minute_cutoff = now_ms - MINUTE_WINDOW_MS;
        let day_cutoff = now_ms - RETENTION_MS;

        let within = |cutoff: i64| log.iter().filter(|t| **t > cutoff && **t <= now_ms).count();
        let used_per_minute = count_u32(within(minute_cutoff));
        let used_today = count_u32(within(day_cutoff));

        let remaining = limits.per_minute.saturating_sub(used_per_minute);
        let percent_used = if limits.per_minute == 0 {
            100.0
        } else {
            (f64::from(used_per_minute) / f64::from(limits.per_minute) * 100.0).min(100.0)
        };

        Self {
            used_per_minute,
            limit: limits.per_minute,
            remaining,
            percent_used,
            is_low: remaining <= limits.low_threshold,
            used_today,
            daily_limit: limits.per_day,
            daily_remaining: limits.per_day.saturating_sub(used_today),
        }
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ============================================================================
// QuotaTracker
// ============================================================================

/// Rolling request log over an injected store.
///
/// `record` does a single read-modify-write with no locking. That is safe
/// for one cooperative thread of control; concurrent writers (several
/// processes sharing one store) can lose updates.
#[derive(Clone)]
pub struct QuotaTracker {
    store: Arc<dyn QuotaStore>,
    limits: QuotaLimits,
}

impl std::fmt::Debug for QuotaTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaTracker")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl QuotaTracker {
    /// Create a tracker over `store` with default limits
    #[must_use]
    pub fn new(store: Arc<dyn QuotaStore>) -> Self {
        Self {
            store,
            limits: QuotaLimits::default(),
        }
    }

    /// In-memory tracker
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Set custom limits
    #[must_use]
    pub fn with_limits(mut self, limits: QuotaLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Configured limits
    #[must_use]
    pub fn limits(&self) -> &QuotaLimits {
        &self.limits
    }

    /// Record a request at the current wall-clock time
    pub fn record(&self) {
        self.record_at(Utc::now().timestamp_millis());
    }

    /// Record a request at `now_ms`.
    ///
    /// Prunes entries older than 24h, appends `now_ms`, then persists.
    /// Never fails: storage errors are logged and dropped.
    ///
    /// Entries stamped after `now_ms` were written by a clock that has
    /// since stepped back; they are dropped so the log stays ordered and
    /// never holds future timestamps.
    pub fn record_at(&self, now_ms: i64) {
        let mut log = self.load();

        let cutoff = now_ms - RETENTION_MS;
        let before = log.len();
        log.retain(|t| *t > cutoff && *t <= now_ms);
        if log.len() != before {
            debug!(pruned = before - log.len(), "Pruned expired quota entries");
        }
        log.push(now_ms);

        match serde_json::to_string(&log) {
            Ok(json) => {
                if let Err(e) = self.store.set(QUOTA_KEY, &json) {
                    warn!(error = %e, "Quota tracking error: failed to persist log");
                }
            }
            Err(e) => warn!(error = %e, "Quota tracking error: failed to serialize log"),
        }
    }

    /// Usage statistics at the current wall-clock time
    #[must_use]
    pub fn stats(&self) -> QuotaStats {
        self.stats_at(Utc::now().timestamp_millis())
    }

    /// Usage statistics as of `now_ms`. Does not modify the log.
    #[must_use]
    pub fn stats_at(&self, now_ms: i64) -> QuotaStats {
        QuotaStats::compute(&self.load(), now_ms, &self.limits)
    }

    /// Current persisted log (missing or corrupt values read as empty)
    #[must_use]
    pub fn log(&self) -> Vec<i64> {
        self.load()
    }

    fn load(&self) -> Vec<i64> {
        let raw = match self.store.get(QUOTA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Quota tracking error: failed to read log");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<i64>>(&raw) {
            Ok(log) => log,
            Err(e) => {
                warn!(error = %e, "Quota log is malformed, treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests;
