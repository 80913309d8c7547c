//! Frame timestamps.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A point in time seen through both clocks.
///
/// `mono` drives frame deltas (immune to clock adjustments); `wall_ms` drives
/// spawn cadence and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    pub mono: Instant,
    pub wall_ms: u64,
}

impl FrameTime {
    pub fn now() -> Self {
        let wall_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            mono: Instant::now(),
            wall_ms,
        }
    }

    pub fn new(mono: Instant, wall_ms: u64) -> Self {
        Self { mono, wall_ms }
    }

    /// The same instant `d` later on both clocks.
    pub fn advanced(self, d: Duration) -> Self {
        Self {
            mono: self.mono + d,
            wall_ms: self.wall_ms + d.as_millis() as u64,
        }
    }
}
