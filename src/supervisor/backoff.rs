//! Reconnect backoff

use embassy_time::{Duration, Instant};

/// Delay before the first retry
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Upper bound for a single delay
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

/// The attempt counter returns to zero after this many failures
pub const DEFAULT_RESET_AFTER: u32 = 10;

/// Exponential reconnect backoff with a capped delay and a bounded exponent
///
/// Delays run 1, 2, 4, 8, 16, 32, 60, 60, 60, 60 seconds and then start over.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    reset_after: u32,
    attempts: u32,
    next_attempt: Instant,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_RESET_AFTER)
    }
}

impl Backoff {
    pub const fn new(base: Duration, max: Duration, reset_after: u32) -> Self {
        Self {
            base,
            max,
            reset_after,
            attempts: 0,
            next_attempt: Instant::from_ticks(0),
        }
    }

    /// Consecutive failures since the last success or counter reset
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Earliest instant the next attempt may run
    pub const fn next_attempt(&self) -> Instant {
        self.next_attempt
    }

    /// Delay that follows the given number of previous failures
    pub fn delay_for(&self, attempts: u32) -> Duration {
        let shift = attempts.min(16);
        let millis = self.base.as_millis().saturating_mul(1 << shift);
        Duration::from_millis(millis).min(self.max)
    }

    /// Returns if an attempt is allowed at `now`
    pub fn ready(&self, now: Instant) -> bool {
        now >= self.next_attempt
    }

    /// Record a failed attempt and schedule the next one
    ///
    /// Returns the delay until the next attempt.
    pub fn record_failure(&mut self, now: Instant) -> Duration {
        let delay = self.delay_for(self.attempts);
        self.attempts += 1;
        if self.attempts >= self.reset_after {
            self.attempts = 0;
        }
        self.next_attempt = now + delay;
        delay
    }

    /// Record a successful attempt
    pub fn record_success(&mut self) {
        self.attempts = 0;
    }

    /// Allow the next attempt immediately, keeping the attempt count
    pub fn retry_now(&mut self, now: Instant) {
        self.next_attempt = now;
    }
}
