/// Fixed-rate frame clock.
///
/// Game logic never reads the wall clock directly: the clock produces a
/// millisecond timestamp once per frame and every timer in the simulation
/// is gated against that value with [`elapsed_past`].

use std::time::{Duration, Instant};

/// `true` once strictly more than `interval_ms` has passed since `since_ms`.
#[inline]
pub fn elapsed_past(now_ms: u64, since_ms: u64, interval_ms: u64) -> bool {
    now_ms.saturating_sub(since_ms) > interval_ms
}

#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    period: Duration,
    next_deadline: Instant,
    frame: u64,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            period,
            next_deadline: start,
            frame: 0,
        }
    }

    /// Sleep until the next frame boundary, then return milliseconds since
    /// the clock was created.
    pub fn tick(&mut self) -> u64 {
        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
        }
        // Don't try to catch up on frames lost to a slow draw
        self.next_deadline = Instant::now().max(self.next_deadline) + self.period;
        self.frame += 1;
        self.elapsed_ms()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Number of completed ticks.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
