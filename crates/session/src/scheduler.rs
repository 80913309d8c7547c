//! Frame scheduler and repeating alert timer.
//!
//! Both timers own their pending deadline. Cancelling drops the deadline, so a
//! cancelled timer can never fire later.

use std::time::{Duration, Instant};

/// Schedules one game frame at a time.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    period: Duration,
    pending: Option<Instant>,
    last_frame: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            pending: None,
            last_frame: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule the next frame one period after the previous one.
    ///
    /// After a cancel there is no previous frame, so `now` becomes the
    /// reference and the first delta is measured from here.
    pub fn arm(&mut self, now: Instant) {
        let last = *self.last_frame.get_or_insert(now);
        self.pending = Some(last + self.period);
    }

    /// Drop the pending frame and the delta reference.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.last_frame = None;
    }

    /// If a frame is due, consume it and return seconds since the last frame.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        let due = self.pending?;
        if now < due {
            return None;
        }
        self.pending = None;
        let last = self.last_frame.replace(now).unwrap_or(now);
        Some(now.saturating_duration_since(last).as_secs_f32())
    }

    /// Time until the pending frame (None when nothing is scheduled).
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|due| due.saturating_duration_since(now))
    }
}

/// Repeating timer in wall-clock milliseconds.
#[derive(Debug, Clone)]
pub struct AlertTimer {
    period_ms: u64,
    next_ms: Option<u64>,
}

impl AlertTimer {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_ms.is_some()
    }

    /// Start firing: once right away, then every period. No-op if running.
    pub fn start(&mut self, now_ms: u64) {
        if self.next_ms.is_none() {
            self.next_ms = Some(now_ms);
        }
    }

    pub fn stop(&mut self) {
        self.next_ms = None;
    }

    /// Whether the timer fires at `now_ms`. Missed periods collapse into one.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_ms {
            Some(next) if now_ms >= next => {
                let behind = (now_ms - next) / self.period_ms;
                self.next_ms = Some(next + (behind + 1) * self.period_ms);
                true
            }
            _ => false,
        }
    }
}
