use std::time::{Duration, Instant};

/// Timing snapshot handed to the application on every frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped per [`FrameClock`].
    pub dt: f32,
    /// Monotonic timestamp of this tick.
    pub now: Instant,
    /// Ticks produced before this one.
    pub frame_index: u64,
}

/// Produces one [`FrameTime`] per redraw.
///
/// Raw deltas are clamped into a configured window. The lower bound keeps
/// zero-delta ticks out of animation code on platforms that can deliver
/// two redraws within timer resolution; the upper bound keeps the first
/// frame after a stall (debugger, minimized window) from teleporting
/// animations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    ticks: u64,
    dt_bounds: (Duration, Duration),
}

const DEFAULT_DT_BOUNDS: (Duration, Duration) =
    (Duration::from_micros(100), Duration::from_millis(250));

impl FrameClock {
    pub fn new() -> Self {
        let (lo, hi) = DEFAULT_DT_BOUNDS;
        Self::with_clamps(lo, hi)
    }

    /// A clock with custom delta bounds.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        FrameClock { last: Instant::now(), ticks: 0, dt_bounds: (dt_min, dt_max) }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw = now.saturating_duration_since(self.last);
        let dt = raw.clamp(self.dt_bounds.0, self.dt_bounds.1);
        self.last = now;

        let snapshot = FrameTime { dt: dt.as_secs_f32(), now, frame_index: self.ticks };
        self.ticks = self.ticks.wrapping_add(1);
        snapshot
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
    fn back_to_back_ticks_respect_the_lower_bound() {
        let mut clock = FrameClock::new();
        clock.tick();
        let ft = clock.tick();
        assert!(ft.dt >= 1e-4);
    }

    #[test]
    fn equal_bounds_pin_the_delta() {
        let fixed = Duration::from_millis(50);
        let mut clock = FrameClock::with_clamps(fixed, fixed);
        let ft = clock.tick();
        assert!((ft.dt - 0.05).abs() < 1e-6);
    }

    #[test]
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn now_is_monotonic_across_ticks() {
        let mut clock = FrameClock::new();
        let a = clock.tick().now;
        let b = clock.tick().now;
        assert!(b >= a);
    }
}
