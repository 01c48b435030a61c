//! Frame timing

use std::time::{Duration, Instant};

/// Longest frame delta reported; a stall past this advances time by this much only
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Wall clock sampled once per frame
#[derive(Debug)]
pub struct Timer {
    last_frame: Instant,
    delta: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Start timing from now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
        }
    }

    /// Sample the clock; call once per frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame).min(MAX_FRAME_DELTA);
        self.last_frame = now;
    }

    /// Seconds between the last two updates, capped at [`MAX_FRAME_DELTA`]
    pub fn delta_time(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_timer_has_zero_delta() {
        assert_eq!(Timer::new().delta_time(), 0.0);
    }

    #[test]
    fn test_delta_is_capped() {
        let mut timer = Timer::new();
        timer.last_frame -= Duration::from_secs(3);
        timer.update();
        assert_eq!(timer.delta_time(), MAX_FRAME_DELTA.as_secs_f32());
    }
}
