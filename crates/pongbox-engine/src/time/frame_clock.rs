use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick. Zero on the first tick.
    pub elapsed: Duration,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

impl FrameTime {
    /// Elapsed time in milliseconds, the unit the animation speeds are tuned in.
    #[inline]
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed.as_secs_f32() * 1000.0
    }

    /// True for the very first frame since the clock was created.
    #[inline]
    pub fn is_first(&self) -> bool {
        self.frame_index == 0
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The first tick only records its timestamp and reports zero elapsed time.
/// Later ticks report the raw difference to the previous tick: there is no
/// clamping, catch-up or frame dropping, one tick per redraw callback.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the previous timestamp; the next tick behaves like the first.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock using the current time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock using an explicit timestamp.
    ///
    /// A timestamp earlier than the previous one yields zero elapsed time.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);

        let ft = FrameTime {
            elapsed,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_reports_zero_elapsed() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.elapsed, Duration::ZERO);
        assert!(ft.is_first());
    }

    #[test]
    fn later_ticks_report_raw_difference() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);

        // Long stalls are passed through unclamped.
        let ft = clock.tick_at(t0 + Duration::from_secs(3));
        assert_eq!(ft.elapsed, Duration::from_secs(3));
        assert_eq!(ft.frame_index, 1);

        let ft = clock.tick_at(t0 + Duration::from_millis(3016));
        assert_eq!(ft.elapsed, Duration::from_millis(16));
        assert!((ft.elapsed_ms() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn reset_restarts_first_tick_behavior() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        clock.reset();
        let ft = clock.tick_at(t0 + Duration::from_secs(1));
        assert_eq!(ft.elapsed, Duration::ZERO);
        // The frame counter keeps counting across resets.
        assert_eq!(ft.frame_index, 1);
    }
}
