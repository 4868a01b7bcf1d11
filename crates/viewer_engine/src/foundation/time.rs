//! Frame timing statistics

use std::time::{Duration, Instant};

/// Frame timer fed once per drawn frame
///
/// The first frame after creation or [`Timer::reset`] measures from the
/// moment of the reset.
#[derive(Debug, Clone)]
pub struct Timer {
    started: Instant,
    last_frame: Instant,
    delta: Duration,
    frames: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Start timing now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            started: now,
            last_frame: now,
            delta: Duration::ZERO,
            frames: 0,
        }
    }

    /// Record a frame drawn now
    pub fn update(&mut self) {
        self.record(Instant::now());
    }

    fn record(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;
    }

    /// Forget every recorded frame and restart from now
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Seconds between the last two frames
    pub fn delta_time(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Seconds from the start to the last recorded frame
    pub fn total_time(&self) -> f32 {
        self.last_frame.saturating_duration_since(self.started).as_secs_f32()
    }

    /// Frames recorded since the start
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Mean frame rate, `0` until time has passed
    pub fn average_fps(&self) -> f32 {
        let total = self.total_time();
        if total > 0.0 {
            self.frames as f32 / total
        } else {
            0.0
        }
    }
}
