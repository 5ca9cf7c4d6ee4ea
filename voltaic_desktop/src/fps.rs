//! Frame-rate counter for the debug overlay.
//!
//! Frames are bucketed per wall-clock second; the displayed value is the
//! previous full second's count. Shown only when `VOLTAIC_DEBUG=1`.

use std::time::{Duration, Instant};

/// Counts frames per second of wall-clock time.
#[derive(Debug)]
pub struct FpsCounter {
    frames: u32,
    fps: u32,
    window_start: Instant,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            fps: 0,
            window_start: Instant::now(),
        }
    }

    /// Records one frame, rolling the window when a second has passed.
    pub fn frame(&mut self) {
        self.frames += 1;
        if self.window_start.elapsed() >= Duration::from_secs(1) {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }

    /// The last completed second's frame count.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
