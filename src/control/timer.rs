use std::time::{Duration, Instant};

/// Fixed-cadence step timer.
///
/// A step is due once strictly more than `interval` has passed since the
/// last recorded step. The mark only moves when a step is taken, so after a
/// pause the next frame steps immediately.
#[derive(Clone, Debug)]
pub struct StepTimer {
    interval: Duration,
    last_step: Instant,
}

impl StepTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_step: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_step) > self.interval
    }

    /// Record a step taken at `now`
    pub fn mark(&mut self, now: Instant) {
        self.last_step = now;
    }
}
