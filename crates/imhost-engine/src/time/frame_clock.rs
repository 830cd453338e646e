use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds. Always `>= dt_min > 0`.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per GUI context (or per loop) so that several overlays do not share
/// delta-time state.
///
/// Delta time is clamped on both ends:
/// - the floor keeps dt strictly positive on the first tick and in tight loops
///   (immediate-mode GUIs assert on a zero delta)
/// - the ceiling keeps animations sane after a debugger pause or a minimized window
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Default floor: 100µs.
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    /// Default ceiling: 250ms.
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    /// Creates a new clock with default clamps.
    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    ///
    /// A zero floor is raised to one nanosecond so dt can never be zero.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        let dt_min = dt_min.max(Duration::from_nanos(1));
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            dt_min,
            dt_max: dt_max.max(dt_min),
        }
    }

    /// Lower delta-time clamp.
    pub fn dt_min(&self) -> Duration {
        self.dt_min
    }

    /// Forgets the previous tick; the next tick reports the floor value.
    ///
    /// Used after the GUI context is recreated or when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock using the current monotonic time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if the tick happened at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last),
            // First frame: nothing to measure against.
            None => Duration::ZERO,
        };
        let dt = raw.clamp(self.dt_min, self.dt_max);

        self.last = Some(now);

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

    #[test]
    fn first_tick_is_clamped_to_floor() {
        let mut clock = FrameClock::new();
        let ft = clock.tick();
        assert!(ft.dt > 0.0);
        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn same_instant_twice_stays_positive() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_secs(1));
        let t = Instant::now();
        clock.tick_at(t);
        let ft = clock.tick_at(t);
        assert_eq!(ft.dt, 0.001);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn stall_is_clamped_to_ceiling() {
        let mut clock = FrameClock::new();
        let t = Instant::now();
        clock.tick_at(t);
        let ft = clock.tick_at(t + Duration::from_secs(10));
        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MAX.as_secs_f32());
    }

    #[test]
    fn zero_floor_is_raised() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_secs(1));
        assert!(clock.tick().dt > 0.0);
    }

    #[test]
    fn reset_returns_to_floor() {
        let mut clock = FrameClock::new();
        let t = Instant::now();
        clock.tick_at(t);
        clock.reset();
        let ft = clock.tick_at(t + Duration::from_millis(16));
        assert_eq!(ft.dt, FrameClock::DEFAULT_DT_MIN.as_secs_f32());
    }
}
