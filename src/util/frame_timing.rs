//! Frame pacing for hosts that run their own loop.

use web_time::{Duration, Instant};

/// Frame pacing for hosts that drive [`crate::sort::SortSession::tick`]
/// from their own loop.
#[derive(Debug, Clone)]
pub struct FramePacer {
    /// Minimum frame duration based on target FPS (zero = unlimited)
    frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f64,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f64,
}

impl FramePacer {
    /// Pacer for the given FPS target (0 = unlimited), starting at `now`.
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            frame_duration,
            last_frame: now,
            smoothed_fps: f64::from(target_fps.max(1)),
            smoothing: 0.05,
        }
    }

    /// How long the host should wait before rendering the next frame.
    pub fn wait_time(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.frame_duration.saturating_sub(elapsed)
    }

    /// Record that a frame was rendered at `now`.
    pub fn end_frame(&mut self, now: Instant) {
        let frame_time = now
            .saturating_duration_since(self.last_frame)
            .as_secs_f64();
        self.last_frame = now;

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Current FPS (smoothed).
    pub fn fps(&self) -> f64 {
        self.smoothed_fps
    }
}
