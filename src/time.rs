//! Frame timing.
//!
//! A single source of truth for time across the frame loop: elapsed
//! seconds, per-frame delta, frame count, and a periodically refreshed
//! FPS figure. The field and circuit layers step in per-frame units;
//! the delta feeds the ambient layer's wall-clock timers.

use std::time::{Duration, Instant};

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct Time {
    start: Instant,
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    pause_elapsed: Duration,
}

impl Time {
    /// Start the clock now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, 0.0);
        }

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = (now.duration_since(self.start) - self.pause_elapsed).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed seconds since start (excluding paused spans).
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze time: `delta()` reports 0 and `elapsed()` stops growing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
