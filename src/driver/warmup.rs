// src/driver/warmup.rs

use core::time::Duration;

use crate::common::hal_traits::Ze15Instant;

/// Refuses reads until the sensor had time to settle after power-up.
///
/// Goes from warming to ready exactly once and never back.
#[derive(Debug, Clone)]
pub struct WarmupGate<I> {
    start: I,
    duration: Duration,
    ready: bool,
}

impl<I: Ze15Instant> WarmupGate<I> {
    pub fn new(start: I, duration: Duration) -> Self {
        WarmupGate {
            start,
            duration,
            ready: duration.is_zero(),
        }
    }

    /// True once `now - start >= duration`. Latches.
    pub fn is_ready(&mut self, now: I) -> bool {
        if !self.ready && now >= self.start && now - self.start >= self.duration {
            self.ready = true;
        }
        self.ready
    }

    /// Time left until ready, zero once ready.
    pub fn remaining(&self, now: I) -> Duration {
        if self.ready {
            return Duration::ZERO;
        }
        if now < self.start {
            return self.duration;
        }
        self.duration.saturating_sub(now - self.start)
    }
}
