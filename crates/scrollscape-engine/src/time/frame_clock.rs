use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds of animation time since the clock was created.
    ///
    /// Advances by at most the clock's step clamp per tick, so a stall or a
    /// debugger pause shows up as one bounded step.
    pub elapsed: f32,
}

/// Frame clock producing `FrameTime` snapshots.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
    max_step: Duration,
}

impl FrameClock {
    /// Creates a new clock with the default 250ms step clamp.
    pub fn new() -> Self {
        Self::with_max_step(Duration::from_millis(250))
    }

    pub fn with_max_step(max_step: Duration) -> Self {
        Self {
            last: Instant::now(),
            elapsed: Duration::ZERO,
            max_step,
        }
    }

    /// Resets the step baseline without touching `elapsed`.
    ///
    /// Used after the window was suspended.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let step = now.saturating_duration_since(self.last).min(self.max_step);
        self.last = now;
        self.elapsed += step;

        FrameTime {
            elapsed: self.elapsed.as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stall_advances_elapsed_by_one_clamped_step() {
        let mut clock = FrameClock::new();
        let start = clock.last;

        let first = clock.tick_at(start + Duration::from_millis(16));
        assert!((first.elapsed - 0.016).abs() < 1e-6);

        let stalled = clock.tick_at(start + Duration::from_secs(3));
        assert!((stalled.elapsed - 0.266).abs() < 1e-5);
    }

    #[test]
    fn reset_drops_suspended_time() {
        let mut clock = FrameClock::with_max_step(Duration::from_secs(10));
        let start = clock.last;
        clock.tick_at(start + Duration::from_millis(100));

        clock.last = start + Duration::from_secs(5);
        let resumed = clock.tick_at(start + Duration::from_millis(5_050));
        assert!((resumed.elapsed - 0.15).abs() < 1e-5);
    }

    #[test]
    fn clock_going_backwards_does_not_rewind() {
        let mut clock = FrameClock::new();
        let start = clock.last;

        let a = clock.tick_at(start + Duration::from_millis(40));
        let b = clock.tick_at(start + Duration::from_millis(10));
        assert_eq!(a.elapsed, b.elapsed);
    }
}
