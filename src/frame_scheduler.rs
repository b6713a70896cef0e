//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

/// Default loop period (10 ms).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(10);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable fixed-period scheduler.
///
/// Tracks frame deadlines with drift correction and returns how long the
/// caller should sleep.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new();
///
/// loop {
///     let now = Instant::now();
///     controller.tick(now);
///     let result = scheduler.tick(now);
///     sleep(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    /// Create a new frame scheduler with `DEFAULT_FRAME_DURATION`.
    pub const fn new() -> Self {
        Self::with_frame_duration(DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub const fn with_frame_duration(frame_duration: Duration) -> Self {
        Self {
            next_frame: None,
            frame_duration,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Account for one frame that ran at `now` and return timing information.
    ///
    /// If we've fallen behind by more than two periods the backlog is
    /// skipped instead of caught up.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        let deadline = match self.next_frame {
            Some(deadline) if now <= deadline + max_drift => deadline,
            _ => now,
        };

        let next_deadline = deadline + self.frame_duration;
        self.next_frame = Some(next_deadline);

        // Zero if we're behind
        let sleep_duration = next_deadline
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        FrameResult {
            next_deadline,
            sleep_duration,
        }
    }
}
