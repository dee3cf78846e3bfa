//! Platform layer for the native driver
//!
//! Frame timing and pacing. Window, input and texture loading belong to
//! whatever embeds the library.

use std::time::{Duration, Instant};

use crate::consts::SCREEN_FPS;

/// Measures frame steps and caps the loop at a target rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last_step: Instant,
    frame_start: Instant,
    frames: u64,
    target: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SCREEN_FPS)
    }
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_step: now,
            frame_start: now,
            frames: 0,
            target: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
        }
    }

    /// Seconds since the previous call (or since creation)
    pub fn step(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_step).as_secs_f32();
        self.last_step = now;
        self.frame_start = now;
        self.frames += 1;
        dt
    }

    /// Average frames per second since the clock started
    pub fn average_fps(&self) -> f32 {
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed <= 0.0 {
            return 0.0;
        }
        self.frames as f32 / elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Sleep out whatever is left of the current frame, best-effort
    pub fn pace(&self) {
        let spent = self.frame_start.elapsed();
        if let Some(rest) = self.target.checked_sub(spent) {
            std::thread::sleep(rest);
        }
    }
}
