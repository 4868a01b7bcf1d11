//! Frame scheduling
//!
//! The render loop never sleeps or spins on its own. It asks a
//! [`FrameScheduler`] for one callback at a time and the host pumps
//! [`RenderLoopController::step`](super::RenderLoopController::step),
//! which consumes the pending request, draws and asks for the next one.

use std::thread;
use std::time::{Duration, Instant};

/// Identifies one outstanding frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

/// One delivered frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Request this tick answers
    pub request: FrameRequest,
    /// Time since the scheduler was created
    pub elapsed: Duration,
}

/// One callback per display frame
pub trait FrameScheduler {
    /// Ask for a callback on the next frame, replacing any pending request
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request; stale requests are ignored
    fn cancel(&mut self, request: FrameRequest);

    /// Whether a request is outstanding
    fn has_pending(&self) -> bool;

    /// Deliver the pending request, if any
    ///
    /// Delivering consumes the request. Returns `None` when nothing is
    /// pending.
    fn next_frame(&mut self) -> Option<FrameTick>;
}

/// Deterministic scheduler with a virtual clock
///
/// Every delivered frame advances the clock by a fixed interval without
/// sleeping, which makes frame sequences reproducible in tests.
#[derive(Debug)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
    interval: Duration,
    clock: Duration,
    delivered: u64,
}

impl ManualScheduler {
    /// Create a scheduler that advances 1/60 s per frame
    pub fn new() -> Self {
        Self::with_interval(Duration::from_micros(16_667))
    }

    /// Create a scheduler that advances `interval` per frame
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            next_id: 0,
            pending: None,
            interval,
            clock: Duration::ZERO,
            delivered: 0,
        }
    }

    /// Number of frames delivered so far
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn next_frame(&mut self) -> Option<FrameTick> {
        let request = self.pending.take()?;
        self.clock += self.interval;
        self.delivered += 1;
        Some(FrameTick {
            request,
            elapsed: self.clock,
        })
    }
}

/// Wall-clock scheduler pacing frames to a target rate
///
/// `next_frame` sleeps until the frame's deadline; frames that are already
/// late are delivered immediately and the schedule restarts from now.
#[derive(Debug)]
pub struct FixedTickScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
    frame_time: Duration,
    start: Instant,
    next_deadline: Instant,
}

impl FixedTickScheduler {
    /// Create a scheduler for `target_fps` frames per second
    ///
    /// A rate of zero is treated as one frame per second.
    pub fn new(target_fps: u32) -> Self {
        let frame_time = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let now = Instant::now();
        Self {
            next_id: 0,
            pending: None,
            frame_time,
            start: now,
            next_deadline: now,
        }
    }

    /// Target duration of one frame
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

impl FrameScheduler for FixedTickScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn next_frame(&mut self) -> Option<FrameTick> {
        let request = self.pending.take()?;

        let now = Instant::now();
        if self.next_deadline > now {
            thread::sleep(self.next_deadline - now);
            self.next_deadline += self.frame_time;
        } else {
            self.next_deadline = now + self.frame_time;
        }

        Some(FrameTick {
            request,
            elapsed: self.start.elapsed(),
        })
    }
}
