//! Time management utilities

use std::time::Instant;

/// High-precision clock for frame timing
///
/// The render loop is driven by millisecond timestamps, matching the
/// timebase the animation step expects. One `update` per frame.
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    timestamp_ms: f64,
    delta_ms: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock starting at timestamp zero
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            timestamp_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Update the clock (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_ms = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.timestamp_ms = now.duration_since(self.start).as_secs_f64() * 1000.0;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Milliseconds since the clock was created
    pub fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    /// Milliseconds since the previous frame
    pub fn delta_ms(&self) -> f64 {
        self.delta_ms
    }

    /// Number of frames observed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
