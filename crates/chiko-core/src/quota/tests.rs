use super::*;

const NOW: i64 = 1_750_000_000_000;

fn tracker() -> QuotaTracker {
    QuotaTracker::in_memory()
}

#[test]
fn test_empty_log_stats() {
    let stats = tracker().stats_at(NOW);
    assert_eq!(stats.used_per_minute, 0);
    assert_eq!(stats.limit, 15);
    assert_eq!(stats.remaining, 15);
    assert_eq!(stats.percent_used, 0.0);
    assert!(!stats.is_low);
    assert_eq!(stats.daily_remaining, 1500);
}

#[test]
fn test_record_then_stats() {
    let t = tracker();
    t.record_at(NOW);
    let stats = t.stats_at(NOW);
    assert_eq!(stats.used_per_minute, 1);
    assert_eq!(stats.remaining, 14);
    assert_eq!(stats.used_today, 1);
}

#[test]
fn test_minute_window_is_exclusive_at_boundary() {
    let t = tracker();
    t.record_at(NOW - MINUTE_WINDOW_MS);
    t.record_at(NOW - MINUTE_WINDOW_MS + 1);
    let stats = t.stats_at(NOW);
    assert_eq!(stats.used_per_minute, 1);
    assert_eq!(stats.used_today, 2);
}

#[test]
fn test_is_low_boundaries() {
    let t = tracker();
    for i in 0..11 {
        t.record_at(NOW - 1000 + i);
    }
    let stats = t.stats_at(NOW);
    assert_eq!(stats.remaining, 4);
    assert!(!stats.is_low);

    t.record_at(NOW);
    let stats = t.stats_at(NOW);
    assert_eq!(stats.remaining, 3);
    assert!(stats.is_low);
}

#[test]
fn test_over_limit_saturates() {
    let t = tracker();
    for i in 0..20 {
        t.record_at(NOW - 20 + i);
    }
    let stats = t.stats_at(NOW);
    assert_eq!(stats.used_per_minute, 20);
    assert_eq!(stats.remaining, 0);
    assert_eq!(stats.percent_used, 100.0);
    assert!(stats.is_low);
}

#[test]
fn test_thousand_recent_requests() {
    let t = tracker();
    for i in 0..1000 {
        t.record_at(NOW - 1000 + i);
    }
    let stats = t.stats_at(NOW);
    assert_eq!(stats.used_per_minute, 1000);
    assert_eq!(stats.remaining, 0);
    assert_eq!(stats.percent_used, 100.0);
    assert!(stats.is_low);
}

#[test]
fn test_prune_drops_entries_older_than_a_day() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(QUOTA_KEY, &format!("[{}, {}]", NOW - RETENTION_MS - 5, NOW - 10))
        .unwrap();

    let t = QuotaTracker::new(store);
    t.record_at(NOW);
    assert_eq!(t.log(), vec![NOW - 10, NOW]);
}

#[test]
fn test_stats_do_not_mutate_log() {
    let t = tracker();
    t.record_at(NOW);
    let _ = t.stats_at(NOW + RETENTION_MS * 2);
    assert_eq!(t.log(), vec![NOW]);
}

#[test]
fn test_clock_step_back_drops_future_entries() {
    let t = tracker();
    t.record_at(NOW);
    t.record_at(NOW - 5_000);
    assert_eq!(t.log(), vec![NOW - 5_000]);
}

#[test]
fn test_clock_briefly_ahead_does_not_inflate_window() {
    let t = tracker();
    t.record_at(NOW + 60 * MINUTE_WINDOW_MS);
    for i in 0..10 {
        t.record_at(NOW + i * 3 * MINUTE_WINDOW_MS);
    }

    let stats = t.stats_at(NOW + 30 * MINUTE_WINDOW_MS);
    assert_eq!(stats.used_per_minute, 0);
    assert_eq!(stats.used_today, 10);

    let stats = t.stats_at(NOW + 27 * MINUTE_WINDOW_MS);
    assert_eq!(stats.used_per_minute, 1);

    let log = t.log();
    assert_eq!(log.len(), 10);
    assert!(log.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(log.last(), Some(&(NOW + 27 * MINUTE_WINDOW_MS)));
}

#[test]
fn test_stats_ignore_entries_after_now() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(QUOTA_KEY, &format!("[{}, {}]", NOW - 10, NOW + 10_000))
        .unwrap();

    let stats = QuotaTracker::new(store).stats_at(NOW);
    assert_eq!(stats.used_per_minute, 1);
    assert_eq!(stats.used_today, 1);
}

#[test]
fn test_corrupt_value_reads_as_empty() {
    let store = Arc::new(MemoryStore::new());
    store.set(QUOTA_KEY, "not json at all").unwrap();

    let t = QuotaTracker::new(store);
    assert_eq!(t.stats_at(NOW).used_per_minute, 0);

    t.record_at(NOW);
    assert_eq!(t.log(), vec![NOW]);
}

#[test]
fn test_zero_limit_reports_exhausted() {
    let t = tracker().with_limits(QuotaLimits {
        per_minute: 0,
        per_day: 0,
        low_threshold: 3,
    });
    let stats = t.stats_at(NOW);
    assert_eq!(stats.remaining, 0);
    assert_eq!(stats.percent_used, 100.0);
    assert!(stats.is_low);
}

#[test]
fn test_custom_limits() {
    let t = tracker().with_limits(QuotaLimits {
        per_minute: 60,
        per_day: 10_000,
        low_threshold: 10,
    });
    for i in 0..30 {
        t.record_at(NOW - 30 + i);
    }
    let stats = t.stats_at(NOW);
    assert_eq!(stats.remaining, 30);
    assert_eq!(stats.percent_used, 50.0);
    assert!(!stats.is_low);
}

struct FailingStore;

impl QuotaStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, crate::error::StoreError> {
        Err(crate::error::StoreError::Poisoned)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), crate::error::StoreError> {
        Err(crate::error::StoreError::Poisoned)
    }
}

#[test]
fn test_storage_failure_is_swallowed() {
    let t = QuotaTracker::new(Arc::new(FailingStore));
    t.record_at(NOW);
    let stats = t.stats_at(NOW);
    assert_eq!(stats.used_per_minute, 0);
}

#[test]
fn test_file_store_persists_across_trackers() {
    let dir = tempfile::tempdir().unwrap();

    let first = QuotaTracker::new(Arc::new(FileStore::new(dir.path())));
    first.record_at(NOW - 2);
    first.record_at(NOW - 1);

    let second = QuotaTracker::new(Arc::new(FileStore::new(dir.path())));
    assert_eq!(second.stats_at(NOW).used_per_minute, 2);
    assert!(dir.path().join("chiko_quota_tracker.json").exists());
}

#[test]
fn test_file_store_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested"));
    assert!(store.get(QUOTA_KEY).unwrap().is_none());
}
