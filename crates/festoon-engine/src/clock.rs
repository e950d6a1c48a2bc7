//! Monotonic engine clock

use std::time::Instant;

/// Supplies the engine's monotonic time in seconds.
///
/// Time only moves when the host asks it to: either deterministically via
/// [`EngineClock::advance`] (tests, headless stepping) or from wall time
/// via [`EngineClock::tick`] once per frame. Scheduler deadlines are all
/// expressed against this clock, so the two driving styles are
/// interchangeable.
pub struct EngineClock {
    /// Total elapsed engine time in seconds
    now: f64,
    /// Time consumed by the last tick, in seconds
    delta_time: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for EngineClock {
    fn default() -> Self {
        Self {
            now: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl EngineClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current engine time in seconds since creation.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Time advanced by the last `tick` or `advance`.
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Advance engine time by exactly `dt` seconds. Negative or NaN
    /// deltas are ignored.
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            self.delta_time = 0.0;
            return;
        }
        self.delta_time = dt;
        self.now += dt;
    }

    /// Advance engine time from wall time. Call once per frame.
    pub fn tick(&mut self) {
        let instant = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = instant;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = instant.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = instant;

        // Clamp to avoid spiral of death (max 250ms frame time)
        self.advance(elapsed.min(0.25));
    }
}
