//! CLI command: `chiko quota`
//!
//! Displays client-side request usage against the configured free-tier
//! limits. Counts come from the local request log, not from the provider.

use crate::app;
use chiko_core::{QuotaStats, QuotaTracker};

/// Run the quota subcommand.
pub async fn run(json: bool, watch: bool) -> anyhow::Result<()> {
    let config = app::load_config()?;
    let tracker = app::quota_tracker(&config);

    if watch {
        run_watch(&tracker).await
    } else if json {
        run_json(&tracker)
    } else {
        run_table(&tracker.stats());
        Ok(())
    }
}

/// Pretty-printed table output.
fn run_table(stats: &QuotaStats) {
    println!();
    println!("  Chiko Quota (estimated, client-side)");
    println!("  {}", "-".repeat(48));
    println!(
        "  {:<12} {:<18} {}",
        "Window", "Remaining", "Used"
    );
    println!("  {}", "-".repeat(48));
    println!(
        "  {:<12} {:<18} {:.0}%{}",
        "per minute",
        format!("{} / {}", stats.remaining, stats.limit),
        stats.percent_used,
        if stats.is_low { " !!" } else { "" }
    );
    println!(
        "  {:<12} {:<18} {}",
        "today",
        format!("{} / {}", stats.daily_remaining, stats.daily_limit),
        stats.used_today
    );
    println!("  {}", "-".repeat(48));
    println!("  {}", gauge(stats));
    println!();
}

/// JSON output for scripting.
fn run_json(tracker: &QuotaTracker) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&tracker.stats())?);
    Ok(())
}

/// Watch mode: refresh display every second.
async fn run_watch(tracker: &QuotaTracker) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(1));
    loop {
        interval.tick().await;
        // Clear screen
        print!("\x1b[2J\x1b[H");
        run_table(&tracker.stats());
        println!("  (refreshing every 1s, Ctrl+C to exit)");
    }
}

// ── helpers ──────────────────────────────────────────────────────────────

/// Remaining capacity bar, `[#####-----]`
fn gauge(stats: &QuotaStats) -> String {
    const WIDTH: usize = 30;
    let remaining_pct = (100.0 - stats.percent_used).clamp(0.0, 100.0);
    let filled = ((remaining_pct / 100.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled.min(WIDTH)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_bounds() {
        let tracker = QuotaTracker::in_memory();
        let empty = tracker.stats_at(0);
        assert_eq!(gauge(&empty), format!("[{}]", "#".repeat(30)));

        for i in 0..20 {
            tracker.record_at(1_000 + i);
        }
        let full = tracker.stats_at(2_000);
        assert_eq!(gauge(&full), format!("[{}]", "-".repeat(30)));
    }
}
