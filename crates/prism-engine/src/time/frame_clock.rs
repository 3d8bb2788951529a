use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds elapsed since the previous tick.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots, one per rendered frame.
///
/// Delta time is clamped so that a window that was minimized, dragged, or
/// paused in a debugger does not hand downstream animation a multi-second step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    /// Creates a clock with the default clamps (`100µs..=250ms`).
    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline without advancing the frame counter.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock to now.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// A `now` earlier than the previous tick counts as zero elapsed time
    /// (then clamped up to the minimum).
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
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

    fn clock_at(start: Instant) -> FrameClock {
        let mut c = FrameClock::new();
        c.last = start;
        c
    }

    #[test]
    fn tick_reports_elapsed_seconds() {
        let t0 = Instant::now();
        let mut c = clock_at(t0);
        let ft = c.tick_at(t0 + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn frame_index_counts_up_from_zero() {
        let t0 = Instant::now();
        let mut c = clock_at(t0);
        assert_eq!(c.tick_at(t0 + Duration::from_millis(10)).frame_index, 0);
        assert_eq!(c.tick_at(t0 + Duration::from_millis(20)).frame_index, 1);
        assert_eq!(c.tick_at(t0 + Duration::from_millis(30)).frame_index, 2);
    }

    #[test]
    fn long_stall_is_clamped_to_max() {
        let t0 = Instant::now();
        let mut c = clock_at(t0);
        let ft = c.tick_at(t0 + Duration::from_secs(5));
        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MAX.as_secs_f32());
    }

    #[test]
    fn zero_elapsed_is_clamped_to_min() {
        let t0 = Instant::now();
        let mut c = clock_at(t0);
        let ft = c.tick_at(t0);
        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
    }

    #[test]
    fn custom_clamps_apply() {
        let t0 = Instant::now();
        let mut c = FrameClock::with_clamps(Duration::ZERO, Duration::from_secs(1));
        c.last = t0;
        assert_eq!(c.tick_at(t0).dt, 0.0);
        assert_eq!(c.tick_at(t0 + Duration::from_secs(3)).dt, 1.0);
    }
}
