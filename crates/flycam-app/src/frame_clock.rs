//! Variable frame timing for the camera update.
//!
//! The controller's smoothing is frame-rate independent, so it runs once per
//! rendered frame with the measured elapsed time. Long stalls (window drags,
//! debugger breaks) are clamped so the camera does not leap on the next frame.

use std::time::Instant;
use tracing::warn;

/// Longest frame handed to the controller, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Measures wall-clock time between frames.
pub struct FrameClock {
    previous_time: Instant,
    frame_count: u64,
}

impl FrameClock {
    /// Starts timing from now.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
        }
    }

    /// Seconds since the previous call (or since creation), clamped to
    /// [`MAX_FRAME_TIME`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.previous_time).as_secs_f32();
        self.previous_time = now;
        self.frame_count += 1;
        clamp_frame_time(elapsed)
    }

    /// Restarts timing without producing a frame, e.g. after the window was
    /// minimized.
    pub fn reset(&mut self) {
        self.previous_time = Instant::now();
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamps a measured frame time to `[0, MAX_FRAME_TIME]`.
pub fn clamp_frame_time(seconds: f32) -> f32 {
    if seconds > MAX_FRAME_TIME {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            seconds * 1000.0,
            MAX_FRAME_TIME * 1000.0
        );
        MAX_FRAME_TIME
    } else {
        seconds.max(0.0)
    }
}
