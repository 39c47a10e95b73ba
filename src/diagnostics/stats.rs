//! Frame pump statistics.
//!
//! Counts what happened on each update tick so a host (or the CLI) can tell a
//! slow tracker from an empty scene from a failing device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters for the frame pump.
#[derive(Debug)]
pub struct PumpStats {
    /// Update ticks received from the host
    ticks: AtomicU64,
    /// Captures handed to the tracker
    captures_enqueued: AtomicU64,
    /// Captures dropped because the tracker queue was full
    captures_dropped: AtomicU64,
    /// Ticks where the tracker had no result ready
    results_pending: AtomicU64,
    /// Results with no bodies in them
    empty_frames: AtomicU64,
    /// Results whose first body was copied into the joint store
    tracked_frames: AtomicU64,
    /// Ticks that ended in an error
    failures: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
}

impl PumpStats {
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            captures_enqueued: AtomicU64::new(0),
            captures_dropped: AtomicU64::new(0),
            results_pending: AtomicU64::new(0),
            empty_frames: AtomicU64::new(0),
            tracked_frames: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            session_start: Utc::now(),
        }
    }

    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_capture_enqueued(&self) {
        self.captures_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_capture_dropped(&self) {
        self.captures_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Captures dropped so far.
    pub fn captures_dropped(&self) -> u64 {
        self.captures_dropped.load(Ordering::Relaxed)
    }

    pub fn record_result_pending(&self) {
        self.results_pending.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_frame(&self) {
        self.empty_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tracked_frame(&self) {
        self.tracked_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> PumpStatsSnapshot {
        PumpStatsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            captures_enqueued: self.captures_enqueued.load(Ordering::Relaxed),
            captures_dropped: self.captures_dropped.load(Ordering::Relaxed),
            results_pending: self.results_pending.load(Ordering::Relaxed),
            empty_frames: self.empty_frames.load(Ordering::Relaxed),
            tracked_frames: self.tracked_frames.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Pump Statistics:\n\
             - Update ticks: {}\n\
             - Captures enqueued: {}\n\
             - Captures dropped: {}\n\
             - Results pending: {}\n\
             - Frames without bodies: {}\n\
             - Frames tracked: {}\n\
             - Failed ticks: {}\n\
             - Session duration: {} seconds",
            stats.ticks,
            stats.captures_enqueued,
            stats.captures_dropped,
            stats.results_pending,
            stats.empty_frames,
            stats.tracked_frames,
            stats.failures,
            stats.session_duration_secs
        )
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.captures_enqueued.store(0, Ordering::Relaxed);
        self.captures_dropped.store(0, Ordering::Relaxed);
        self.results_pending.store(0, Ordering::Relaxed);
        self.empty_frames.store(0, Ordering::Relaxed);
        self.tracked_frames.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

impl Default for PumpStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of pump statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpStatsSnapshot {
    pub ticks: u64,
    pub captures_enqueued: u64,
    pub captures_dropped: u64,
    pub results_pending: u64,
    pub empty_frames: u64,
    pub tracked_frames: u64,
    pub failures: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counting() {
        let stats = PumpStats::new();

        stats.record_tick();
        stats.record_tick();
        stats.record_capture_enqueued();
        stats.record_tracked_frame();
        stats.record_failure();

        let snapshot = stats.stats();
        assert_eq!(snapshot.ticks, 2);
        assert_eq!(snapshot.captures_enqueued, 1);
        assert_eq!(snapshot.tracked_frames, 1);
        assert_eq!(snapshot.failures, 1);
        assert_eq!(snapshot.empty_frames, 0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = PumpStats::new();
        stats.record_tick();
        stats.record_result_pending();
        stats.record_capture_dropped();
        stats.reset();

        let snapshot = stats.stats();
        assert_eq!(snapshot.ticks, 0);
        assert_eq!(snapshot.results_pending, 0);
        assert_eq!(snapshot.captures_dropped, 0);
    }

    #[test]
    fn test_summary_format() {
        let summary = PumpStats::new().summary();
        assert!(summary.contains("Update ticks"));
        assert!(summary.contains("Frames tracked"));
        assert!(summary.contains("Failed ticks"));
    }
}
