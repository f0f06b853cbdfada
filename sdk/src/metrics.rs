//! Session metrics tracking.
//!
//! Provides atomic counters for monitoring a room session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics for a room session.
#[derive(Debug)]
pub struct SessionMetrics {
    /// Total connections opened.
    connections_opened: AtomicU64,

    /// Total connections closed or failed.
    connections_closed: AtomicU64,

    /// Total text frames received on a current connection.
    frames_received: AtomicU64,

    /// Frames that changed at least one slice or emitted an event.
    frames_applied: AtomicU64,

    /// Frames that failed to decode.
    frames_dropped: AtomicU64,

    /// Frames of unknown type or without effect.
    frames_ignored: AtomicU64,

    /// Commands queued for sending.
    commands_sent: AtomicU64,

    /// Commands skipped by a guard.
    commands_skipped: AtomicU64,

    /// Start time for rate calculation.
    start_time: Instant,
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMetrics {
    /// Creates a new metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections_opened: AtomicU64::new(0),
            connections_closed: AtomicU64::new(0),
            frames_received: AtomicU64::new(0),
            frames_applied: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            frames_ignored: AtomicU64::new(0),
            commands_sent: AtomicU64::new(0),
            commands_skipped: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a connection opened.
    pub fn record_connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a connection closed.
    pub fn record_connection_closed(&self) {
        self.connections_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a frame received.
    pub fn record_frame_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a frame applied.
    pub fn record_frame_applied(&self) {
        self.frames_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a frame dropped.
    pub fn record_frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a frame ignored.
    pub fn record_frame_ignored(&self) {
        self.frames_ignored.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a command sent.
    pub fn record_command_sent(&self) {
        self.commands_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a command skipped.
    pub fn record_command_skipped(&self) {
        self.commands_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total connections opened.
    #[must_use]
    pub fn connections_opened(&self) -> u64 {
        self.connections_opened.load(Ordering::Relaxed)
    }

    /// Returns the total connections closed.
    #[must_use]
    pub fn connections_closed(&self) -> u64 {
        self.connections_closed.load(Ordering::Relaxed)
    }

    /// Returns the total frames received.
    #[must_use]
    pub fn frames_received(&self) -> u64 {
        self.frames_received.load(Ordering::Relaxed)
    }

    /// Returns the total frames applied.
    #[must_use]
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied.load(Ordering::Relaxed)
    }

    /// Returns the total frames dropped.
    #[must_use]
    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    /// Returns the total frames ignored.
    #[must_use]
    pub fn frames_ignored(&self) -> u64 {
        self.frames_ignored.load(Ordering::Relaxed)
    }

    /// Returns the total commands sent.
    #[must_use]
    pub fn commands_sent(&self) -> u64 {
        self.commands_sent.load(Ordering::Relaxed)
    }

    /// Returns the total commands skipped.
    #[must_use]
    pub fn commands_skipped(&self) -> u64 {
        self.commands_skipped.load(Ordering::Relaxed)
    }

    /// Returns the uptime.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns frames received per second since creation.
    #[must_use]
    pub fn frames_per_second(&self) -> f64 {
        let secs = self.uptime().as_secs_f64();
        if secs > 0.0 {
            self.frames_received() as f64 / secs
        } else {
            0.0
        }
    }
}
